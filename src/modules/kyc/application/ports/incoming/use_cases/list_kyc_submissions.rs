use async_trait::async_trait;

use crate::kyc::application::domain::entities::KycStatus;
use crate::kyc::application::ports::outgoing::KycSubmissionSummary;
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListKycSubmissionsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait ListKycSubmissionsUseCase: Send + Sync {
    async fn execute(
        &self,
        status: Option<KycStatus>,
        page: PageRequest,
    ) -> Result<PageResult<KycSubmissionSummary>, ListKycSubmissionsError>;
}

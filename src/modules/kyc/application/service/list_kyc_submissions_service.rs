use async_trait::async_trait;

use crate::kyc::application::domain::entities::KycStatus;
use crate::kyc::application::ports::incoming::use_cases::{
    ListKycSubmissionsError, ListKycSubmissionsUseCase,
};
use crate::kyc::application::ports::outgoing::{KycQuery, KycSubmissionSummary};
use crate::shared::{PageRequest, PageResult};

pub struct ListKycSubmissionsService<Q>
where
    Q: KycQuery,
{
    kyc_query: Q,
}

impl<Q> ListKycSubmissionsService<Q>
where
    Q: KycQuery,
{
    pub fn new(kyc_query: Q) -> Self {
        Self { kyc_query }
    }
}

#[async_trait]
impl<Q> ListKycSubmissionsUseCase for ListKycSubmissionsService<Q>
where
    Q: KycQuery,
{
    async fn execute(
        &self,
        status: Option<KycStatus>,
        page: PageRequest,
    ) -> Result<PageResult<KycSubmissionSummary>, ListKycSubmissionsError> {
        self.kyc_query
            .list_submissions(status, page)
            .await
            .map_err(|e| ListKycSubmissionsError::QueryFailed(e.to_string()))
    }
}

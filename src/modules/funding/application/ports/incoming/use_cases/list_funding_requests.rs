use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::FundingRequest;
use crate::funding::application::ports::outgoing::FundingFilter;
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListFundingRequestsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait ListMyFundingRequestsUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId)
        -> Result<Vec<FundingRequest>, ListFundingRequestsError>;
}

#[async_trait]
pub trait ListFundingRequestsUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: FundingFilter,
        page: PageRequest,
    ) -> Result<PageResult<FundingRequest>, ListFundingRequestsError>;
}

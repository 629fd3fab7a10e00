use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::{FundingKind, FundingRequest, FundingStatus};
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundingFilter {
    pub status: Option<FundingStatus>,
    pub kind: Option<FundingKind>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FundingQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait FundingQuery: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FundingRequest>, FundingQueryError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: UserId)
        -> Result<Vec<FundingRequest>, FundingQueryError>;

    /// Newest first.
    async fn list(
        &self,
        filter: FundingFilter,
        page: PageRequest,
    ) -> Result<PageResult<FundingRequest>, FundingQueryError>;

    async fn count_by_status(&self, status: FundingStatus) -> Result<u64, FundingQueryError>;
}

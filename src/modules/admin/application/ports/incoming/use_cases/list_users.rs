use async_trait::async_trait;

use crate::admin::application::ports::outgoing::{AdminUserSummary, UserFilter};
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListUsersError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<PageResult<AdminUserSummary>, ListUsersError>;
}

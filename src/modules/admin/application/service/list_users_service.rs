use async_trait::async_trait;

use crate::admin::application::ports::incoming::use_cases::{ListUsersError, ListUsersUseCase};
use crate::admin::application::ports::outgoing::{AdminQuery, AdminUserSummary, UserFilter};
use crate::shared::{PageRequest, PageResult};

pub struct ListUsersService<Q: AdminQuery> {
    admin_query: Q,
}

impl<Q: AdminQuery> ListUsersService<Q> {
    pub fn new(admin_query: Q) -> Self {
        Self { admin_query }
    }
}

#[async_trait]
impl<Q: AdminQuery> ListUsersUseCase for ListUsersService<Q> {
    async fn execute(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<PageResult<AdminUserSummary>, ListUsersError> {
        let filter = UserFilter {
            search: filter
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ..filter
        };

        self.admin_query
            .list_users(&filter, page)
            .await
            .map_err(|e| ListUsersError::QueryFailed(e.to_string()))
    }
}

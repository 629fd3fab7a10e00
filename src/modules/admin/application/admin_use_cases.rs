use std::sync::Arc;

use crate::admin::application::ports::incoming::use_cases::{
    GetAnalyticsUseCase, GetDashboardUseCase, GetUserDetailUseCase, ListUsersUseCase,
};

#[derive(Clone)]
pub struct AdminUseCases {
    pub list_users: Arc<dyn ListUsersUseCase + Send + Sync>,
    pub get_user: Arc<dyn GetUserDetailUseCase + Send + Sync>,
    pub analytics: Arc<dyn GetAnalyticsUseCase + Send + Sync>,
    pub dashboard: Arc<dyn GetDashboardUseCase + Send + Sync>,
}

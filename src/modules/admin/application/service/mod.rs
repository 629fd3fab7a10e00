mod get_user_detail_service;
mod list_users_service;
mod platform_reports_service;

pub use get_user_detail_service::GetUserDetailService;
pub use list_users_service::ListUsersService;
pub use platform_reports_service::{GetAnalyticsService, GetDashboardService};

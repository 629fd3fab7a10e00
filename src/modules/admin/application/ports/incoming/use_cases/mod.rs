mod get_user_detail;
mod list_users;
mod platform_reports;

pub use get_user_detail::{AdminUserDetail, GetUserDetailError, GetUserDetailUseCase};
pub use list_users::{ListUsersError, ListUsersUseCase};
pub use platform_reports::{
    AdminDashboard, GetAnalyticsUseCase, GetDashboardUseCase, PlatformAnalytics,
    PlatformReportError,
};

pub mod reports;
pub mod users;

pub use reports::{analytics_handler, dashboard_handler};
pub use users::{get_user_handler, list_users_handler};

pub mod fetch_user;
pub mod login_user;
pub mod logout_user;
pub mod password_reset;
pub mod register_user;
pub mod resend_verification;
pub mod update_profile;
pub mod upload_avatar;
pub mod verify_email;

pub use fetch_user::{auth_me_handler, profile_me_handler};
pub use login_user::login_user_handler;
pub use logout_user::logout_user_handler;
pub use password_reset::{forgot_password_handler, reset_password_handler};
pub use register_user::register_user_handler;
pub use resend_verification::resend_verification_handler;
pub use update_profile::update_profile_handler;
pub use upload_avatar::upload_avatar_handler;
pub use verify_email::verify_user_email_handler;

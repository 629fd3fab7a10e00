pub mod create_user;
pub mod fetch_profile;
pub mod login_user;
pub mod logout_user;
pub mod request_password_reset;
pub mod resend_verification;
pub mod reset_password;
pub mod update_profile;
pub mod upload_avatar;
pub mod verify_user_email;

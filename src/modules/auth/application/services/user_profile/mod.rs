pub mod fetch_user;
pub mod update_profile;
pub mod upload_avatar;

pub use fetch_user::FetchUserProfileService;
pub use update_profile::UpdateUserProfileService;
pub use upload_avatar::UploadAvatarService;

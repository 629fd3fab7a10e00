use async_trait::async_trait;

use crate::auth::application::domain::entities::{UserId, UserView};
use crate::storage::application::domain::UploadRejection;

#[derive(Clone, Debug)]
pub struct UploadAvatarInput {
    pub user_id: UserId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum UploadAvatarError {
    #[error("Invalid avatar: {0}")]
    InvalidFile(#[from] UploadRejection),

    #[error("User not found")]
    UserNotFound,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Avatars stay editable after KYC verification.
#[async_trait]
pub trait UploadAvatarUseCase: Send + Sync {
    async fn execute(&self, input: UploadAvatarInput) -> Result<UserView, UploadAvatarError>;
}

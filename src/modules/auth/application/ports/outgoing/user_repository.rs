use async_trait::async_trait;

use crate::auth::application::domain::entities::{NewUser, ProfileChanges, User, UserId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Write side of the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    async fn mark_email_verified(&self, user_id: UserId) -> Result<User, UserRepositoryError>;

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError>;

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError>;

    async fn set_avatar(
        &self,
        user_id: UserId,
        avatar_path: String,
    ) -> Result<User, UserRepositoryError>;
}

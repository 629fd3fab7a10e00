use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Stored user record is invalid: {0}")]
    CorruptRecord(String),
}

/// Read side of the credential store.
#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError>;

    /// `email` must already be normalised (trimmed, lowercase).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError>;
}

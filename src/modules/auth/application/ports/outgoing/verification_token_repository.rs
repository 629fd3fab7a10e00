use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::EmailVerification => "email_verification",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerificationTokenError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Single-use tokens for email verification and password reset.
///
/// Only SHA-256 hashes of the raw tokens are ever handed to this port.
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    async fn store(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), VerificationTokenError>;

    /// Deletes the matching token and returns `true` if it existed and had not
    /// expired at `now`. Expired matches are deleted as well but return `false`.
    async fn consume(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, VerificationTokenError>;

    async fn delete_for_user(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
    ) -> Result<u64, VerificationTokenError>;
}

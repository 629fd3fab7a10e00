use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenRepositoryError {
    #[error("Token store error: {0}")]
    StoreError(String),

    #[error("Token already expired")]
    AlreadyExpired,
}

/// Server-side deny list for session tokens, keyed by `jti`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn revoke_token(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    async fn is_token_revoked(&self, jti: Uuid) -> Result<bool, TokenRepositoryError>;
}

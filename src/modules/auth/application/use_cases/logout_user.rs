use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::application::ports::outgoing::token_repository::{
    TokenRepository, TokenRepositoryError,
};

/// Session being ended, as resolved by the bearer extractor.
#[derive(Debug, Clone)]
pub struct LogoutRequest {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogoutError {
    #[error("Token revocation failed: {0}")]
    TokenRevocationFailed(String),
}

#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> Result<(), LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    token_repository: Arc<dyn TokenRepository>,
}

impl LogoutUseCase {
    pub fn new(token_repository: Arc<dyn TokenRepository>) -> Self {
        Self { token_repository }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, request: LogoutRequest) -> Result<(), LogoutError> {
        match self
            .token_repository
            .revoke_token(request.jti, request.user_id, request.expires_at)
            .await
        {
            Ok(()) => {
                info!(user_id = %request.user_id, jti = %request.jti, "Session revoked");
                Ok(())
            }
            Err(TokenRepositoryError::AlreadyExpired) => {
                warn!(user_id = %request.user_id, "Logout with an already expired token");
                Ok(())
            }
            Err(e) => Err(LogoutError::TokenRevocationFailed(e.to_string())),
        }
    }
}

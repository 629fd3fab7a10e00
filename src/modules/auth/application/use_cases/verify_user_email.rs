use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{UserId, UserView};
use crate::auth::application::ports::outgoing::{
    token_hasher::hash_token, TokenProvider, TokenPurpose, UserQuery, UserRepository,
    VerificationTokenRepository,
};

#[derive(Debug, Clone)]
pub struct VerifyEmailOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyUserEmailError {
    #[error("Invalid or expired verification token")]
    InvalidOrExpiredToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IVerifyUserEmailUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<VerifyEmailOutput, VerifyUserEmailError>;
}

pub struct VerifyUserEmailUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    query: Q,
    repository: R,
    tokens: T,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q, R, T> VerifyUserEmailUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    pub fn new(query: Q, repository: R, tokens: T, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            query,
            repository,
            tokens,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R, T> IVerifyUserEmailUseCase for VerifyUserEmailUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    async fn execute(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<VerifyEmailOutput, VerifyUserEmailError> {
        let user_id = UserId::from(user_id);
        let token = token.trim();
        if token.is_empty() {
            return Err(VerifyUserEmailError::InvalidOrExpiredToken);
        }

        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| VerifyUserEmailError::RepositoryError(e.to_string()))?
            .ok_or(VerifyUserEmailError::UserNotFound)?;

        let consumed = self
            .tokens
            .consume(
                user_id,
                TokenPurpose::EmailVerification,
                &hash_token(token),
                Utc::now(),
            )
            .await
            .map_err(|e| VerifyUserEmailError::RepositoryError(e.to_string()))?;

        if !consumed {
            return Err(VerifyUserEmailError::InvalidOrExpiredToken);
        }

        let user = if user.email_verified {
            user
        } else {
            self.repository
                .mark_email_verified(user_id)
                .await
                .map_err(|e| VerifyUserEmailError::RepositoryError(e.to_string()))?
        };

        let issued = self
            .token_provider
            .generate_session_token(user.id.value(), user.role)
            .map_err(|e| VerifyUserEmailError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Email verified");

        Ok(VerifyEmailOutput {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.sanitize(),
        })
    }
}

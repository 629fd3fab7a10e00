use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    token_hasher::hash_token, PasswordHasher, TokenPurpose, UserQuery, UserRepository,
    VerificationTokenRepository,
};
use crate::auth::application::services::password::BasicPasswordPolicy;
use crate::auth::application::use_cases::create_user::normalize_email;

#[derive(Debug, Clone)]
pub struct ResetPasswordInput {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError>;
}

pub struct ResetPasswordUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    query: Q,
    repository: R,
    tokens: T,
    password_hasher: Arc<dyn PasswordHasher>,
    password_policy: BasicPasswordPolicy,
}

impl<Q, R, T> ResetPasswordUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        tokens: T,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            query,
            repository,
            tokens,
            password_hasher,
            password_policy: BasicPasswordPolicy,
        }
    }
}

#[async_trait]
impl<Q, R, T> IResetPasswordUseCase for ResetPasswordUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
        let email = normalize_email(&input.email)
            .map_err(|e| ResetPasswordError::InvalidInput(e.to_string()))?;
        self.password_policy
            .validate(&input.new_password)
            .map_err(|e| ResetPasswordError::InvalidInput(e.to_string()))?;

        let token = input.token.trim();
        if token.is_empty() {
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        }

        // Unknown email and bad token are reported the same way.
        let user = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?
            .ok_or(ResetPasswordError::InvalidOrExpiredToken)?;

        let consumed = self
            .tokens
            .consume(
                user.id,
                TokenPurpose::PasswordReset,
                &hash_token(token),
                Utc::now(),
            )
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?;
        if !consumed {
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        }

        let password_hash = self
            .password_hasher
            .hash_password(&input.new_password)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(())
    }
}

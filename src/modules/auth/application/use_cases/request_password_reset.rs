use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::ports::outgoing::{
    token_hasher::{generate_secure_token, hash_token},
    TokenPurpose, UserQuery, VerificationTokenRepository,
};
use crate::auth::application::use_cases::create_user::normalize_email;
use crate::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotifier,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IRequestPasswordResetUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), RequestPasswordResetError>;
}

pub struct RequestPasswordResetUseCase<Q, T>
where
    Q: UserQuery,
    T: VerificationTokenRepository,
{
    query: Q,
    tokens: T,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    reset_ttl_secs: i64,
}

impl<Q, T> RequestPasswordResetUseCase<Q, T>
where
    Q: UserQuery,
    T: VerificationTokenRepository,
{
    pub fn new(
        query: Q,
        tokens: T,
        notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
        reset_ttl_secs: i64,
    ) -> Self {
        Self {
            query,
            tokens,
            notifier,
            reset_ttl_secs,
        }
    }
}

#[async_trait]
impl<Q, T> IRequestPasswordResetUseCase for RequestPasswordResetUseCase<Q, T>
where
    Q: UserQuery,
    T: VerificationTokenRepository,
{
    async fn execute(&self, email: &str) -> Result<(), RequestPasswordResetError> {
        let email = normalize_email(email)
            .map_err(|e| RequestPasswordResetError::InvalidInput(e.to_string()))?;

        let Some(user) = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?
        else {
            return Ok(());
        };

        // One outstanding reset link per account.
        self.tokens
            .delete_for_user(user.id, TokenPurpose::PasswordReset)
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;

        let token = generate_secure_token();
        self.tokens
            .store(
                user.id,
                TokenPurpose::PasswordReset,
                hash_token(&token),
                Utc::now() + Duration::seconds(self.reset_ttl_secs),
            )
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;

        let recipient = EmailRecipient {
            user_id: user.id.value(),
            email: user.email,
            first_name: user.profile.first_name,
        };
        match self
            .notifier
            .send_password_reset_email(&recipient, &token)
            .await
        {
            Ok(()) => info!(user_id = %recipient.user_id, "Password reset email sent"),
            Err(e) => warn!(user_id = %recipient.user_id, "Password reset email failed: {}", e),
        }

        Ok(())
    }
}

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
pub enum ResendVerificationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Succeeds whether or not the address belongs to an account.
#[async_trait]
pub trait IResendVerificationUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), ResendVerificationError>;
}

pub struct ResendVerificationUseCase<Q, T>
where
    Q: UserQuery,
    T: VerificationTokenRepository,
{
    query: Q,
    tokens: T,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    verification_ttl_secs: i64,
}

impl<Q, T> ResendVerificationUseCase<Q, T>
where
    Q: UserQuery,
    T: VerificationTokenRepository,
{
    pub fn new(
        query: Q,
        tokens: T,
        notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
        verification_ttl_secs: i64,
    ) -> Self {
        Self {
            query,
            tokens,
            notifier,
            verification_ttl_secs,
        }
    }
}

#[async_trait]
impl<Q, T> IResendVerificationUseCase for ResendVerificationUseCase<Q, T>
where
    Q: UserQuery,
    T: VerificationTokenRepository,
{
    async fn execute(&self, email: &str) -> Result<(), ResendVerificationError> {
        let email = normalize_email(email)
            .map_err(|e| ResendVerificationError::InvalidInput(e.to_string()))?;

        let user = match self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| ResendVerificationError::RepositoryError(e.to_string()))?
        {
            Some(user) if !user.email_verified => user,
            _ => return Ok(()),
        };

        self.tokens
            .delete_for_user(user.id, TokenPurpose::EmailVerification)
            .await
            .map_err(|e| ResendVerificationError::RepositoryError(e.to_string()))?;

        let token = generate_secure_token();
        self.tokens
            .store(
                user.id,
                TokenPurpose::EmailVerification,
                hash_token(&token),
                Utc::now() + Duration::seconds(self.verification_ttl_secs),
            )
            .await
            .map_err(|e| ResendVerificationError::RepositoryError(e.to_string()))?;

        let recipient = EmailRecipient {
            user_id: user.id.value(),
            email: user.email,
            first_name: user.profile.first_name,
        };
        match self.notifier.send_verification_email(&recipient, &token).await {
            Ok(()) => info!(user_id = %recipient.user_id, "Verification email re-sent"),
            Err(e) => warn!(user_id = %recipient.user_id, "Verification email failed: {}", e),
        }

        Ok(())
    }
}

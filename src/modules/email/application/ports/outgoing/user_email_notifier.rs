use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Who an account email goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecipient {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    /// `token` is the raw single-use token; it only ever leaves the process here.
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;
}

use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EmailSendError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Could not build message: {0}")]
    BuildFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError>;
}

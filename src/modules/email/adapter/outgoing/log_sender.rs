use async_trait::async_trait;
use tracing::info;

use crate::email::application::ports::outgoing::email_sender::{EmailSendError, EmailSender};

/// Used when no SMTP relay is configured: the message is written to the log
/// instead of being delivered, so tokens stay reachable in development.
#[derive(Debug, Clone, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        info!(to = %to, subject = %subject, body = %body, "Email delivery skipped (no SMTP configured)");
        Ok(())
    }
}

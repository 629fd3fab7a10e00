use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::email::application::ports::outgoing::email_sender::{EmailSendError, EmailSender};
use crate::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotificationError, UserEmailNotifier,
};

/// Captures every account email instead of delivering it.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    verification: Arc<Mutex<Vec<(EmailRecipient, String)>>>,
    reset: Arc<Mutex<Vec<(EmailRecipient, String)>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// Records the attempt, then reports a delivery failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn verification_tokens(&self) -> Vec<(String, String)> {
        Self::flatten(&self.verification)
    }

    pub fn reset_tokens(&self) -> Vec<(String, String)> {
        Self::flatten(&self.reset)
    }

    /// Most recent reset token sent to `email`.
    pub fn last_reset_token_for(&self, email: &str) -> Option<String> {
        self.reset_tokens()
            .into_iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token)
    }

    fn flatten(sent: &Mutex<Vec<(EmailRecipient, String)>>) -> Vec<(String, String)> {
        sent.lock()
            .unwrap()
            .iter()
            .map(|(r, t)| (r.email.clone(), t.clone()))
            .collect()
    }

    fn outcome(&self) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            Err(UserEmailNotificationError::EmailSendingFailed(
                "SMTP unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingNotifier {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        self.verification
            .lock()
            .unwrap()
            .push((recipient.clone(), token.to_string()));
        self.outcome()
    }

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        self.reset
            .lock()
            .unwrap()
            .push((recipient.clone(), token.to_string()));
        self.outcome()
    }
}

/// One message handed to an [`EmailSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps rendered messages in an outbox for inspection.
#[derive(Clone, Default)]
pub struct OutboxSender {
    outbox: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl OutboxSender {
    pub fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for OutboxSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        self.outbox.lock().unwrap().push(OutboundEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

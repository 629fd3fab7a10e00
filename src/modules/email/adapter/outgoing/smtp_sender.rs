use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::email::application::ports::outgoing::email_sender::{EmailSendError, EmailSender};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    /// STARTTLS relay with credentials.
    pub fn new(
        smtp_server: &str,
        smtp_username: &str,
        smtp_password: &str,
        from_email: &str,
    ) -> Result<Self, EmailSendError> {
        let creds = Credentials::new(smtp_username.to_string(), smtp_password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
            .map_err(|e| EmailSendError::Transport(e.to_string()))?
            .credentials(creds)
            .build();

        Ok(Self::new_with_mailer(Box::new(transport), from_email))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        let email = Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|e| EmailSendError::InvalidAddress(format!("from: {:?}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| EmailSendError::InvalidAddress(format!("to: {:?}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| EmailSendError::BuildFailed(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(EmailSendError::Transport)
    }
}

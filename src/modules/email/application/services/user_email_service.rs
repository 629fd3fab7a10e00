use async_trait::async_trait;
use std::sync::Arc;

use crate::email::application::ports::outgoing::{
    EmailRecipient, EmailSender, UserEmailNotificationError, UserEmailNotifier,
};

/// Renders account emails and hands them to the configured sender.
#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    app_url: String,
    verification_ttl_hours: i64,
    reset_ttl_minutes: i64,
}

impl UserEmailService {
    pub fn new(
        sender: Arc<dyn EmailSender + Send + Sync>,
        app_url: impl Into<String>,
        verification_ttl_secs: i64,
        reset_ttl_secs: i64,
    ) -> Self {
        Self {
            sender,
            app_url: app_url.into().trim_end_matches('/').to_string(),
            verification_ttl_hours: (verification_ttl_secs / 3600).max(1),
            reset_ttl_minutes: (reset_ttl_secs / 60).max(1),
        }
    }

    fn verification_link(&self, recipient: &EmailRecipient, token: &str) -> String {
        format!(
            "{}/verify-email?userId={}&token={}",
            self.app_url, recipient.user_id, token
        )
    }

    fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.app_url, token)
    }

    fn button(href: &str, label: &str) -> String {
        format!(
            r#"<a href="{href}" style="display:inline-block;padding:10px 20px;background-color:#0B6E4F;color:white;text-decoration:none;border-radius:5px;">{label}</a>"#
        )
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = self.verification_link(recipient, token);
        let body = format!(
            r#"<p>Hi {name},</p>
<p>Welcome aboard. Confirm your email address to activate your account:</p>
<p>{button}</p>
<p>Or paste this code into the app: <code>{token}</code></p>
<p>The link expires in {hours} hours.</p>"#,
            name = recipient.first_name,
            button = Self::button(&link, "Verify email"),
            token = token,
            hours = self.verification_ttl_hours,
        );

        self.sender
            .send_email(&recipient.email, "Verify your email", &body)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))
    }

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = self.reset_link(token);
        let body = format!(
            r#"<p>Hi {name},</p>
<p>We received a request to reset your password.</p>
<p>{button}</p>
<p>The link expires in {minutes} minutes. If you did not ask for this, ignore this email.</p>"#,
            name = recipient.first_name,
            button = Self::button(&link, "Reset password"),
            minutes = self.reset_ttl_minutes,
        );

        self.sender
            .send_email(&recipient.email, "Reset your password", &body)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))
    }
}

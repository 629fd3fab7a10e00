use std::sync::Arc;
use std::time::Duration;

use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserInput, CreateUserOutput, ICreateUserUseCase,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotifier,
};

const MAX_EMAIL_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub struct UserRegistrationOutput {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub message: String,
    pub verification_token: String,
}

impl From<CreateUserOutput> for UserRegistrationOutput {
    fn from(output: CreateUserOutput) -> Self {
        Self {
            user_id: output.user_id,
            email: output.email,
            message: "Account created. Please check your email to verify your account."
                .to_string(),
            verification_token: output.verification_token,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),
}

/// Creates the account, then delivers the verification email in the background.
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create_user_use_case,
            email_service,
        }
    }

    pub async fn register_user(
        &self,
        input: CreateUserInput,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created_user = self.create_user_use_case.execute(input).await?;

        let email_service = self.email_service.clone();
        let recipient = EmailRecipient {
            user_id: created_user.user_id,
            email: created_user.email.clone(),
            first_name: created_user.first_name.clone(),
        };
        let token = created_user.verification_token.clone();

        // Mail delivery never fails registration.
        tokio::spawn(async move {
            for attempt in 1..=MAX_EMAIL_ATTEMPTS {
                match email_service
                    .send_verification_email(&recipient, &token)
                    .await
                {
                    Ok(_) => return,
                    Err(e) if attempt < MAX_EMAIL_ATTEMPTS => {
                        tracing::warn!(
                            "Email attempt {}/{} failed for user {}: {}. Retrying...",
                            attempt,
                            MAX_EMAIL_ATTEMPTS,
                            recipient.user_id,
                            e
                        );
                        tokio::time::sleep(Duration::from_secs(2_u64.pow(attempt))).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            "All {} email attempts failed for user {}: {}",
                            MAX_EMAIL_ATTEMPTS,
                            recipient.user_id,
                            e
                        );
                    }
                }
            }
        });

        Ok(created_user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotificationError;
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };
    use tokio::sync::Notify;
    use uuid::Uuid;

    #[derive(Clone)]
    struct MockCreateUserUseCase {
        result: Result<CreateUserOutput, CreateUserError>,
    }

    #[async_trait]
    impl ICreateUserUseCase for MockCreateUserUseCase {
        async fn execute(
            &self,
            _input: CreateUserInput,
        ) -> Result<CreateUserOutput, CreateUserError> {
            self.result.clone()
        }
    }

    #[derive(Clone)]
    struct MockUserEmailNotifier {
        should_fail: bool,
        calls: Arc<AtomicUsize>,
        tokens: Arc<Mutex<Vec<String>>>,
        notify: Arc<Notify>,
    }

    impl MockUserEmailNotifier {
        fn new(should_fail: bool) -> Self {
            Self {
                should_fail,
                calls: Arc::new(AtomicUsize::new(0)),
                tokens: Arc::new(Mutex::new(Vec::new())),
                notify: Arc::new(Notify::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserEmailNotifier for MockUserEmailNotifier {
        async fn send_verification_email(
            &self,
            _recipient: &EmailRecipient,
            token: &str,
        ) -> Result<(), UserEmailNotificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.tokens.lock().unwrap().push(token.to_string());
            self.notify.notify_one();

            if self.should_fail {
                Err(UserEmailNotificationError::EmailSendingFailed(
                    "SMTP down".to_string(),
                ))
            } else {
                Ok(())
            }
        }

        async fn send_password_reset_email(
            &self,
            _recipient: &EmailRecipient,
            _token: &str,
        ) -> Result<(), UserEmailNotificationError> {
            unimplemented!("not used during registration")
        }
    }

    fn valid_input() -> CreateUserInput {
        CreateUserInput {
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            country: "NG".to_string(),
            username: None,
            phone: None,
            referrer_id: None,
        }
    }

    fn created_user() -> CreateUserOutput {
        CreateUserOutput {
            user_id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            first_name: "Jo".to_string(),
            verification_token: "raw-token".to_string(),
        }
    }

    #[tokio::test]
    async fn register_user_success_sends_token_by_email() {
        let notifier = MockUserEmailNotifier::new(false);
        let orchestrator = UserRegistrationOrchestrator::new(
            Arc::new(MockCreateUserUseCase {
                result: Ok(created_user()),
            }),
            Arc::new(notifier.clone()),
        );

        let output = orchestrator.register_user(valid_input()).await.unwrap();

        assert_eq!(output.email, "a@x.com");
        assert_eq!(output.verification_token, "raw-token");
        assert!(output.message.contains("check your email"));

        tokio::time::timeout(Duration::from_secs(1), notifier.notify.notified())
            .await
            .expect("Email should have been sent within 1 second");

        assert_eq!(notifier.tokens.lock().unwrap().as_slice(), ["raw-token"]);
    }

    #[tokio::test]
    async fn register_user_succeeds_even_when_email_fails() {
        let notifier = MockUserEmailNotifier::new(true);
        let orchestrator = UserRegistrationOrchestrator::new(
            Arc::new(MockCreateUserUseCase {
                result: Ok(created_user()),
            }),
            Arc::new(notifier.clone()),
        );

        assert!(orchestrator.register_user(valid_input()).await.is_ok());

        tokio::time::timeout(Duration::from_secs(1), notifier.notify.notified())
            .await
            .expect("First email attempt should happen immediately");

        assert!(notifier.call_count() >= 1);
    }

    #[tokio::test]
    async fn register_user_create_user_fails() {
        let notifier = MockUserEmailNotifier::new(false);
        let orchestrator = UserRegistrationOrchestrator::new(
            Arc::new(MockCreateUserUseCase {
                result: Err(CreateUserError::EmailAlreadyExists),
            }),
            Arc::new(notifier.clone()),
        );

        let result = orchestrator.register_user(valid_input()).await;

        assert!(matches!(
            result,
            Err(UserRegistrationError::CreateUserFailed(
                CreateUserError::EmailAlreadyExists
            ))
        ));

        tokio::task::yield_now().await;
        assert_eq!(notifier.call_count(), 0);
    }
}

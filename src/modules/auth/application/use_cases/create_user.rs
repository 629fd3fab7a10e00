use async_trait::async_trait;
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{NewUser, UserId, UserProfile};
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    token_hasher::{generate_secure_token, hash_token},
    PasswordHasher, TokenPurpose, UserQuery, UserRepository, UserRepositoryError,
    VerificationTokenRepository,
};
use crate::auth::application::services::password::BasicPasswordPolicy;

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub referrer_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct CreateUserOutput {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    /// Raw single-use token; only its hash is persisted.
    pub verification_token: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateUserError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Referrer does not exist")]
    InvalidReferrer,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError>;
}

pub struct CreateUserUseCase<Q, R, T>
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
    verification_ttl_secs: i64,
}

impl<Q, R, T> CreateUserUseCase<Q, R, T>
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
        verification_ttl_secs: i64,
    ) -> Self {
        Self {
            query,
            repository,
            tokens,
            password_hasher,
            password_policy: BasicPasswordPolicy,
            verification_ttl_secs,
        }
    }

    fn required(field: &str, value: &str) -> Result<String, CreateUserError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CreateUserError::InvalidInput(format!(
                "{field} is required"
            )));
        }
        Ok(trimmed.to_string())
    }

    fn optional(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Lowercased, trimmed email or a validation error.
pub fn normalize_email(email: &str) -> Result<String, CreateUserError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CreateUserError::InvalidInput("email is required".to_string()));
    }
    if !EmailAddress::is_valid(email) {
        return Err(CreateUserError::InvalidInput(
            "email is not a valid address".to_string(),
        ));
    }
    Ok(email.to_lowercase())
}

#[async_trait]
impl<Q, R, T> ICreateUserUseCase for CreateUserUseCase<Q, R, T>
where
    Q: UserQuery,
    R: UserRepository,
    T: VerificationTokenRepository,
{
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
        let email = normalize_email(&input.email)?;
        self.password_policy
            .validate(&input.password)
            .map_err(|e| CreateUserError::InvalidInput(e.to_string()))?;
        let first_name = Self::required("firstName", &input.first_name)?;
        let last_name = Self::required("lastName", &input.last_name)?;
        let country = Self::required("country", &input.country)?;
        let username = Self::optional(input.username);

        if self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?
            .is_some()
        {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        if let Some(username) = &username {
            if self
                .query
                .find_by_username(username)
                .await
                .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?
                .is_some()
            {
                return Err(CreateUserError::UsernameAlreadyExists);
            }
        }

        let referrer_id = match input.referrer_id {
            Some(id) => {
                let referrer = self
                    .query
                    .find_by_id(UserId::from(id))
                    .await
                    .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
                Some(referrer.ok_or(CreateUserError::InvalidReferrer)?.id)
            }
            None => None,
        };

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create_user(NewUser {
                email,
                password_hash,
                profile: UserProfile {
                    first_name,
                    last_name,
                    username,
                    country,
                    phone: Self::optional(input.phone),
                    ..Default::default()
                },
                referrer_id,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => CreateUserError::EmailAlreadyExists,
                UserRepositoryError::UsernameTaken => CreateUserError::UsernameAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })?;

        let verification_token = generate_secure_token();
        self.tokens
            .store(
                user.id,
                TokenPurpose::EmailVerification,
                hash_token(&verification_token),
                Utc::now() + Duration::seconds(self.verification_ttl_secs),
            )
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;

        Ok(CreateUserOutput {
            user_id: user.id.value(),
            email: user.email,
            first_name: user.profile.first_name,
            verification_token,
        })
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::auth::application::domain::entities::UserView;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};

/// Bcrypt hash of a random string. Verified against for unknown emails so that both
/// failure paths cost one hash comparison.
const DUMMY_PASSWORD_HASH: &str = "$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

// ========================= Login Request =========================
/// Validated login request - can be deserialized directly from JSON
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = Self::validate_email(email)?;
        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    fn validate_email(email: String) -> Result<String, LoginRequestError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }

        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }

        Ok(email.to_lowercase())
    }
}

impl<'de> Deserialize<'de> for LoginRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LoginRequestHelper {
            email: String,
            password: String,
        }

        let helper = LoginRequestHelper::deserialize(deserializer)?;
        LoginRequest::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address has not been verified")]
    EmailNotVerified,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

// ============================ Login Response =================================
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

// ============================ Login User Use Case =============================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

pub struct LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(DUMMY_PASSWORD_HASH);

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        let user = match user {
            Some(user) if is_valid => user,
            _ => return Err(LoginError::InvalidCredentials),
        };

        if !user.email_verified {
            return Err(LoginError::EmailNotVerified);
        }

        let issued = self
            .token_provider
            .generate_session_token(user.id.value(), user.role)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginUserResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.sanitize(),
        })
    }
}

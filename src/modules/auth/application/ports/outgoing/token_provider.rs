use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token type, expected: {0}")]
    InvalidTokenType(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

pub const SESSION_TOKEN_TYPE: &str = "session";

/// JWT claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub role: Role,
    pub jti: Uuid,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String,
}

impl TokenClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: Uuid,
    pub expires_at: DateTime<Utc>,
}

pub trait TokenProvider: Send + Sync {
    fn generate_session_token(&self, user_id: Uuid, role: Role)
        -> Result<IssuedToken, TokenError>;

    /// Verifies signature, issuer, time window and token type.
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}

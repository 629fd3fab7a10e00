use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::token_provider::{
    IssuedToken, TokenClaims, TokenError, TokenProvider, SESSION_TOKEN_TYPE,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_session_token(
        &self,
        user_id: Uuid,
        role: Role,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.config.session_token_expiry);
        let jti = Uuid::new_v4();

        let claims = TokenClaims {
            sub: user_id,
            role,
            jti,
            iss: self.config.issuer.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_at,
        })
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let decoded = decode::<TokenClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Token verification failed: Unexpected issuer");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: {}", e);
                        TokenError::MalformedToken
                    }
                }
            })?;

        let claims = decoded.claims;
        if claims.token_type != SESSION_TOKEN_TYPE {
            tracing::warn!(
                "Token type mismatch: expected '{}', got '{}'",
                SESSION_TOKEN_TYPE,
                claims.token_type
            );
            return Err(TokenError::InvalidTokenType(SESSION_TOKEN_TYPE.to_string()));
        }

        Ok(claims)
    }
}

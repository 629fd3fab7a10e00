use crate::shared::config::AppConfig;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub session_token_expiry: i64, // seconds
}

impl JwtConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            secret_key: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            session_token_expiry: config.session_token_expiry,
        }
    }
}

// src/shared/config.rs
use anyhow::{bail, Context};
use std::env;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub username: String,
    pub password: String,
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_env: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub session_token_expiry: i64,
    pub verification_token_expiry: i64,
    pub password_reset_expiry: i64,
    pub upload_dir: String,
    pub max_upload_bytes: usize,
    pub app_url: String,
    pub email_from: String,
    pub smtp: Option<SmtpConfig>,
    pub expose_verification_token: bool,
}

impl AppConfig {
    /// Loads `.env.{RUST_ENV}` (falling back to `.env`) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let app_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let env_file = format!(".env.{}", app_env);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_or("PORT", 8080u16)?;

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let redis_url = env::var("REDIS_URL").context("REDIS_URL is not set")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters long for HS256");
        }
        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "invest-platform".to_string());

        let session_token_expiry = parse_or("JWT_SESSION_EXPIRY", 604_800i64)?;
        let verification_token_expiry = parse_or("JWT_VERIFICATION_EXPIRY", 86_400i64)?;
        let password_reset_expiry = parse_or("PASSWORD_RESET_EXPIRY", 3_600i64)?;
        if session_token_expiry <= 0 || verification_token_expiry <= 0 || password_reset_expiry <= 0
        {
            bail!("Token expiry values must be positive");
        }

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
        let max_upload_bytes = parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let app_url = env::var("APP_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        let email_from =
            env::var("EMAIL_FROM").unwrap_or_else(|_| "no-reply@invest.local".to_string());

        let smtp = match (
            env::var("SMTP_SERVER"),
            env::var("SMTP_USERNAME"),
            env::var("SMTP_PASSWORD"),
        ) {
            (Ok(server), Ok(username), Ok(password)) => Some(SmtpConfig {
                server,
                username,
                password,
            }),
            _ => None,
        };

        let expose_verification_token = match env::var("EXPOSE_VERIFICATION_TOKEN") {
            Ok(v) => parse_bool(&v).context("EXPOSE_VERIFICATION_TOKEN must be true or false")?,
            Err(_) => app_env != "production",
        };

        Ok(Self {
            app_env,
            host,
            port,
            database_url,
            redis_url,
            jwt_secret,
            jwt_issuer,
            session_token_expiry,
            verification_token_expiry,
            password_reset_expiry,
            upload_dir,
            max_upload_bytes,
            app_url,
            email_from,
            smtp,
            expose_verification_token,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

/// The slice of configuration that request handlers read.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub max_upload_bytes: usize,
    /// Echo raw verification tokens in API responses. Off in production.
    pub expose_verification_token: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            expose_verification_token: false,
        }
    }
}

impl From<&AppConfig> for RuntimeSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            expose_verification_token: config.expose_verification_token,
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid {key} value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

use async_trait::async_trait;
use bcrypt::{hash, verify};

use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};

pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt runs on the blocking pool so request workers stay responsive.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| HashError::Aborted(e.to_string()))?
            .map_err(|e| HashError::Hash(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();

        tokio::task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|e| HashError::Aborted(e.to_string()))?
            .map_err(|e| HashError::MalformedHash(e.to_string()))
    }
}

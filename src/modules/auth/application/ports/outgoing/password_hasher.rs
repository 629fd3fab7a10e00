use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
    #[error("Could not hash password: {0}")]
    Hash(String),

    #[error("Stored password hash is unreadable: {0}")]
    MalformedHash(String),

    #[error("Hashing task aborted: {0}")]
    Aborted(String),
}

/// One-way password hashing. A wrong password is `Ok(false)`, never an error.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}

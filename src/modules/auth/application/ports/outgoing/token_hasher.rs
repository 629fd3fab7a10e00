use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

const SECURE_TOKEN_LEN: usize = 43;

/// Hash a token using SHA-256 for storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Random URL-safe token with roughly 256 bits of entropy.
pub fn generate_secure_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECURE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

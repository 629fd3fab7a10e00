use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::token_repository::{
    TokenRepository, TokenRepositoryError,
};

/// Redis-backed deny list for revoked session tokens.
///
/// ## Redis data model
///
/// ```text
/// auth:revoked:jti:{jti}        -> "{user_id}"   (TTL = token expiry)
/// auth:revoked:user:{user_id}   -> SET(jti)      (TTL = latest token expiry)
/// ```
///
/// The per-token key is authoritative: if it exists, the token is revoked.
/// Redis TTL handles cleanup, so no sweeper job is needed.
#[derive(Clone)]
pub struct RedisTokenRepository {
    pool: Arc<Pool>,
}

impl RedisTokenRepository {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn token_key(jti: Uuid) -> String {
        format!("auth:revoked:jti:{jti}")
    }

    fn user_key(user_id: Uuid) -> String {
        format!("auth:revoked:user:{user_id}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, TokenRepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|e| TokenRepositoryError::StoreError(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    /// Revoke a single session token.
    ///
    /// ```text
    /// SET    auth:revoked:jti:{jti} "{user_id}"
    /// EXPIRE auth:revoked:jti:{jti} <ttl>
    /// SADD   auth:revoked:user:{user_id} {jti}
    /// EXPIRE auth:revoked:user:{user_id} <ttl>
    /// ```
    ///
    /// Wrapped in `MULTI/EXEC` so the index never disagrees with the token key.
    async fn revoke_token(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        let ttl = (expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            return Err(TokenRepositoryError::AlreadyExpired);
        }

        let token_key = Self::token_key(jti);
        let user_key = Self::user_key(user_id);

        let mut conn = self.get_conn().await?;

        deadpool_redis::redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&token_key)
            .arg(user_id.to_string())
            .ignore()
            .cmd("EXPIRE")
            .arg(&token_key)
            .arg(ttl)
            .ignore()
            .cmd("SADD")
            .arg(&user_key)
            .arg(jti.to_string())
            .ignore()
            .cmd("EXPIRE")
            .arg(&user_key)
            .arg(ttl)
            .ignore()
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| TokenRepositoryError::StoreError(e.to_string()))?;

        Ok(())
    }

    async fn is_token_revoked(&self, jti: Uuid) -> Result<bool, TokenRepositoryError> {
        let mut conn = self.get_conn().await?;

        let exists: bool = conn
            .exists(Self::token_key(jti))
            .await
            .map_err(|e| TokenRepositoryError::StoreError(e.to_string()))?;

        Ok(exists)
    }
}

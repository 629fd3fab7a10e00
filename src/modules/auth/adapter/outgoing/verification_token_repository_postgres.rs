use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::verification_tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
};
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::verification_token_repository::{
    TokenPurpose, VerificationTokenError, VerificationTokenRepository,
};

#[derive(Clone, Debug)]
pub struct VerificationTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl VerificationTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VerificationTokenRepository for VerificationTokenRepositoryPostgres {
    async fn store(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), VerificationTokenError> {
        let active = TokenActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.value()),
            purpose: Set(purpose.as_str().to_string()),
            token_hash: Set(token_hash),
            expires_at: Set(expires_at.fixed_offset()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        TokenEntity::insert(active)
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| VerificationTokenError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// A single `DELETE ... RETURNING` so two concurrent consumers cannot both win.
    async fn consume(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, VerificationTokenError> {
        let deleted = TokenEntity::delete_many()
            .filter(TokenColumn::UserId.eq(user_id.value()))
            .filter(TokenColumn::Purpose.eq(purpose.as_str()))
            .filter(TokenColumn::TokenHash.eq(token_hash))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| VerificationTokenError::DatabaseError(e.to_string()))?;

        Ok(deleted
            .iter()
            .any(|row| row.expires_at.with_timezone(&Utc) > now))
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
    ) -> Result<u64, VerificationTokenError> {
        let result = TokenEntity::delete_many()
            .filter(TokenColumn::UserId.eq(user_id.value()))
            .filter(TokenColumn::Purpose.eq(purpose.as_str()))
            .exec(&*self.db)
            .await
            .map_err(|e| VerificationTokenError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity, Model as UserModel};
use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_model(model: Option<UserModel>) -> Result<Option<User>, UserQueryError> {
        model
            .map(|m| m.into_domain().map_err(UserQueryError::CorruptRecord))
            .transpose()
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Self::map_model(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Self::map_model(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Self::map_model(user)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::{NewUser, ProfileChanges, Role, User, UserId};
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};
use crate::kyc::application::domain::entities::KycStatus;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load(&self, user_id: UserId) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)
    }

    async fn save(&self, active: UserActiveModel) -> Result<User, UserRepositoryError> {
        let updated = active.update(&*self.db).await.map_err(map_write_err)?;
        to_domain(updated)
    }
}

fn to_domain(model: UserModel) -> Result<User, UserRepositoryError> {
    model
        .into_domain()
        .map_err(UserRepositoryError::DatabaseError)
}

/// Unique violations on `username` become `UsernameTaken`; any other unique
/// violation on `users` can only be the email.
fn map_write_err(e: DbErr) -> UserRepositoryError {
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
    {
        if err_str.contains("username") {
            return UserRepositoryError::UsernameTaken;
        }
        return UserRepositoryError::UserAlreadyExists;
    }
    UserRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let now = Utc::now().fixed_offset();
        let profile = user.profile;

        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(Role::User.as_str().to_string()),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            username: Set(profile.username),
            country: Set(profile.country),
            gender: Set(profile.gender),
            date_of_birth: Set(profile.date_of_birth),
            phone: Set(profile.phone),
            address_line: Set(profile.address_line),
            city: Set(profile.city),
            state: Set(profile.state),
            postal_code: Set(profile.postal_code),
            avatar_path: Set(profile.avatar_path),
            email_verified: Set(false),
            referrer_id: Set(user.referrer_id.map(|r| r.value())),
            kyc_status: Set(KycStatus::None.as_str().to_string()),
            kyc_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = active_user.insert(&*self.db).await.map_err(map_write_err)?;
        to_domain(inserted)
    }

    async fn mark_email_verified(&self, user_id: UserId) -> Result<User, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.load(user_id).await?.into();
        active_user.email_verified = Set(true);
        self.save(active_user).await
    }

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let mut active_user: UserActiveModel = self.load(user_id).await?.into();
        active_user.password_hash = Set(new_password_hash);
        self.save(active_user).await.map(|_| ())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.load(user_id).await?.into();

        if let Some(v) = changes.first_name {
            active_user.first_name = Set(v);
        }
        if let Some(v) = changes.last_name {
            active_user.last_name = Set(v);
        }
        if let Some(v) = changes.username {
            active_user.username = Set(Some(v));
        }
        if let Some(v) = changes.country {
            active_user.country = Set(v);
        }
        if let Some(v) = changes.gender {
            active_user.gender = Set(Some(v));
        }
        if let Some(v) = changes.date_of_birth {
            active_user.date_of_birth = Set(Some(v));
        }
        if let Some(v) = changes.phone {
            active_user.phone = Set(Some(v));
        }
        if let Some(v) = changes.address_line {
            active_user.address_line = Set(Some(v));
        }
        if let Some(v) = changes.city {
            active_user.city = Set(Some(v));
        }
        if let Some(v) = changes.state {
            active_user.state = Set(Some(v));
        }
        if let Some(v) = changes.postal_code {
            active_user.postal_code = Set(Some(v));
        }

        self.save(active_user).await
    }

    async fn set_avatar(
        &self,
        user_id: UserId,
        avatar_path: String,
    ) -> Result<User, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.load(user_id).await?.into();
        active_user.avatar_path = Set(Some(avatar_path));
        self.save(active_user).await
    }
}

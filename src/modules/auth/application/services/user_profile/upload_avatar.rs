use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::auth::application::{
    domain::entities::UserView,
    ports::outgoing::{UserQuery, UserRepository, UserRepositoryError},
    use_cases::upload_avatar::{UploadAvatarError, UploadAvatarInput, UploadAvatarUseCase},
};
use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::ports::outgoing::{FileCategory, FileStorage};

pub struct UploadAvatarService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    user_query: Q,
    user_repository: R,
    storage: Arc<dyn FileStorage>,
    policy: UploadPolicy,
}

impl<Q, R> UploadAvatarService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R, storage: Arc<dyn FileStorage>, policy: UploadPolicy) -> Self {
        Self {
            user_query: query,
            user_repository: repository,
            storage,
            policy,
        }
    }
}

#[async_trait]
impl<Q, R> UploadAvatarUseCase for UploadAvatarService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, input: UploadAvatarInput) -> Result<UserView, UploadAvatarError> {
        let mime = self.policy.check(
            &input.file_name,
            input.content_type.as_deref(),
            input.bytes.len() as u64,
        )?;

        let user = self
            .user_query
            .find_by_id(input.user_id)
            .await
            .map_err(|e| UploadAvatarError::RepositoryError(e.to_string()))?
            .ok_or(UploadAvatarError::UserNotFound)?;

        let stored = self
            .storage
            .store(FileCategory::Avatar, &mime, input.bytes)
            .await
            .map_err(|e| UploadAvatarError::StorageError(e.to_string()))?;

        let updated = match self
            .user_repository
            .set_avatar(user.id, stored.path.clone())
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&stored.path).await {
                    warn!(path = %stored.path, "Failed to remove orphaned avatar: {}", cleanup);
                }
                return Err(match e {
                    UserRepositoryError::UserNotFound => UploadAvatarError::UserNotFound,
                    other => UploadAvatarError::RepositoryError(other.to_string()),
                });
            }
        };

        if let Some(previous) = user.profile.avatar_path {
            if let Err(e) = self.storage.delete(&previous).await {
                warn!(path = %previous, "Failed to remove previous avatar: {}", e);
            }
        }

        Ok(updated.sanitize())
    }
}

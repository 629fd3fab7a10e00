use async_trait::async_trait;

use crate::auth::application::domain::entities::{UserId, UserView};
use crate::auth::application::ports::outgoing::user_query::UserQueryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchUserError {
    /// The session outlived the account it was issued for.
    #[error("User no longer exists")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

/// Loads the sanitized view shared by `/api/auth/me` and `/api/profile/me`.
#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<UserView, FetchUserError>;
}

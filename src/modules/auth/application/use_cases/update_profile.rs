use async_trait::async_trait;

use crate::auth::application::{
    domain::entities::{ProfileChanges, UserId, UserView},
    ports::outgoing::user_query::UserQueryError,
};

#[derive(Clone, Debug)]
pub struct UpdateUserInput {
    pub user_id: UserId,
    pub changes: ProfileChanges,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum UpdateUserError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Profile is locked after KYC verification")]
    ProfileLocked,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<UserQueryError> for UpdateUserError {
    fn from(e: UserQueryError) -> Self {
        UpdateUserError::RepositoryError(e.to_string())
    }
}

#[async_trait]
pub trait UpdateUserProfileUseCase: Send + Sync {
    async fn execute(&self, data: UpdateUserInput) -> Result<UserView, UpdateUserError>;
}

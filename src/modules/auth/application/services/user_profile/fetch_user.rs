use async_trait::async_trait;

use crate::auth::application::{
    domain::entities::{UserId, UserView},
    ports::outgoing::UserQuery,
    use_cases::fetch_profile::{FetchUserError, FetchUserProfileUseCase},
};

pub struct FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    user_query: Q,
}

impl<Q> FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { user_query: query }
    }
}

#[async_trait]
impl<Q> FetchUserProfileUseCase for FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, user_id: UserId) -> Result<UserView, FetchUserError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await?
            .ok_or(FetchUserError::UserNotFound)?;

        Ok(user.sanitize())
    }
}

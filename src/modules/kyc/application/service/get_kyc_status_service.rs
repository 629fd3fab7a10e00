use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::kyc::application::ports::incoming::use_cases::{GetKycStatusError, GetKycStatusUseCase};
use crate::kyc::application::ports::outgoing::KycView;

pub struct GetKycStatusService<Q>
where
    Q: UserQuery,
{
    user_query: Q,
}

impl<Q> GetKycStatusService<Q>
where
    Q: UserQuery,
{
    pub fn new(user_query: Q) -> Self {
        Self { user_query }
    }
}

#[async_trait]
impl<Q> GetKycStatusUseCase for GetKycStatusService<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, user_id: UserId) -> Result<KycView, GetKycStatusError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|e| GetKycStatusError::QueryError(e.to_string()))?
            .ok_or(GetKycStatusError::UserNotFound)?;

        Ok(KycView::from(&user.kyc))
    }
}

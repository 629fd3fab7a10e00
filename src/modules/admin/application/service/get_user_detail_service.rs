use async_trait::async_trait;

use crate::admin::application::ports::incoming::use_cases::{
    AdminUserDetail, GetUserDetailError, GetUserDetailUseCase,
};
use crate::admin::application::ports::outgoing::AdminQuery;
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::kyc::application::ports::outgoing::KycView;

pub struct GetUserDetailService<U, Q>
where
    U: UserQuery,
    Q: AdminQuery,
{
    user_query: U,
    admin_query: Q,
}

impl<U, Q> GetUserDetailService<U, Q>
where
    U: UserQuery,
    Q: AdminQuery,
{
    pub fn new(user_query: U, admin_query: Q) -> Self {
        Self {
            user_query,
            admin_query,
        }
    }
}

#[async_trait]
impl<U, Q> GetUserDetailUseCase for GetUserDetailService<U, Q>
where
    U: UserQuery,
    Q: AdminQuery,
{
    async fn execute(&self, user_id: UserId) -> Result<AdminUserDetail, GetUserDetailError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|e| GetUserDetailError::QueryFailed(e.to_string()))?
            .ok_or(GetUserDetailError::UserNotFound)?;

        let referral_count = self
            .admin_query
            .referral_count(user.id)
            .await
            .map_err(|e| GetUserDetailError::QueryFailed(e.to_string()))?;

        Ok(AdminUserDetail {
            user: user.sanitize(),
            kyc: KycView::from(&user.kyc),
            referral_count,
        })
    }
}

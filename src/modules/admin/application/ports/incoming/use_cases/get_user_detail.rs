use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::{UserId, UserView};
use crate::kyc::application::ports::outgoing::KycView;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDetail {
    pub user: UserView,
    pub kyc: KycView,
    pub referral_count: u64,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetUserDetailError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetUserDetailUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<AdminUserDetail, GetUserDetailError>;
}

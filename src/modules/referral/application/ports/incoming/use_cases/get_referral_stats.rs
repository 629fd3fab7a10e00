use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::UserId;
use crate::referral::application::ports::outgoing::ReferredUser;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStats {
    /// Code to share at registration; it is the referrer's user id.
    pub referral_code: String,
    /// Referred users who verified their email.
    pub verified_referrals: u64,
    pub pending_referrals: u64,
    pub referrals: Vec<ReferredUser>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetReferralStatsError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetReferralStatsUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<ReferralStats, GetReferralStatsError>;
}

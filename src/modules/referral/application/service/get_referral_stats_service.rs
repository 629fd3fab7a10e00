use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::referral::application::ports::incoming::use_cases::{
    GetReferralStatsError, GetReferralStatsUseCase, ReferralStats,
};
use crate::referral::application::ports::outgoing::ReferralQuery;

pub struct GetReferralStatsService<U, Q>
where
    U: UserQuery,
    Q: ReferralQuery,
{
    user_query: U,
    referral_query: Q,
}

impl<U, Q> GetReferralStatsService<U, Q>
where
    U: UserQuery,
    Q: ReferralQuery,
{
    pub fn new(user_query: U, referral_query: Q) -> Self {
        Self {
            user_query,
            referral_query,
        }
    }
}

#[async_trait]
impl<U, Q> GetReferralStatsUseCase for GetReferralStatsService<U, Q>
where
    U: UserQuery,
    Q: ReferralQuery,
{
    async fn execute(&self, user_id: UserId) -> Result<ReferralStats, GetReferralStatsError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|e| GetReferralStatsError::QueryFailed(e.to_string()))?
            .ok_or(GetReferralStatsError::UserNotFound)?;

        let referrals = self
            .referral_query
            .list_referred(user.id)
            .await
            .map_err(|e| GetReferralStatsError::QueryFailed(e.to_string()))?;

        let verified = referrals.iter().filter(|r| r.email_verified).count() as u64;

        Ok(ReferralStats {
            referral_code: user.id.to_string(),
            verified_referrals: verified,
            pending_referrals: referrals.len() as u64 - verified,
            referrals,
        })
    }
}

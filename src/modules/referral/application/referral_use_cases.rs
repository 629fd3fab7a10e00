use std::sync::Arc;

use crate::referral::application::ports::incoming::use_cases::GetReferralStatsUseCase;

#[derive(Clone)]
pub struct ReferralUseCases {
    pub get_stats: Arc<dyn GetReferralStatsUseCase + Send + Sync>,
}

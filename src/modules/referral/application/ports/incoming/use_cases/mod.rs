mod get_referral_stats;

pub use get_referral_stats::{GetReferralStatsError, GetReferralStatsUseCase, ReferralStats};

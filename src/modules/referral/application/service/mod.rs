mod get_referral_stats_service;

pub use get_referral_stats_service::GetReferralStatsService;

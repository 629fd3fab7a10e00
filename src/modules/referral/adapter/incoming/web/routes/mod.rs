pub mod referral_stats;

pub use referral_stats::referral_stats_handler;

pub mod referral_query_postgres;

pub use referral_query_postgres::ReferralQueryPostgres;

pub mod admin;
pub mod auth;
pub mod email;
pub mod funding;
pub mod kyc;
pub mod referral;
pub mod storage;

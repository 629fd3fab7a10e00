pub mod referral_query;

pub use referral_query::{ReferralQuery, ReferralQueryError, ReferredUser};

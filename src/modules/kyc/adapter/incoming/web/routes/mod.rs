pub mod kyc_status;
pub mod review_kyc;
pub mod submit_kyc;

pub use kyc_status::kyc_status_handler;
pub use review_kyc::{approve_kyc_handler, list_kyc_submissions_handler, reject_kyc_handler};
pub use submit_kyc::submit_kyc_handler;

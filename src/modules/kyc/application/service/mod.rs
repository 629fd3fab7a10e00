mod approve_kyc_service;
mod get_kyc_status_service;
mod list_kyc_submissions_service;
mod reject_kyc_service;
mod submit_kyc_service;

pub use approve_kyc_service::ApproveKycService;
pub use get_kyc_status_service::GetKycStatusService;
pub use list_kyc_submissions_service::ListKycSubmissionsService;
pub use reject_kyc_service::RejectKycService;
pub use submit_kyc_service::SubmitKycService;

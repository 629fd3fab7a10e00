mod approve_kyc;
mod get_kyc_status;
mod list_kyc_submissions;
mod reject_kyc;
mod submit_kyc;

pub use approve_kyc::{ApproveKycError, ApproveKycUseCase};
pub use get_kyc_status::{GetKycStatusError, GetKycStatusUseCase};
pub use list_kyc_submissions::{ListKycSubmissionsError, ListKycSubmissionsUseCase};
pub use reject_kyc::{RejectKycError, RejectKycUseCase};
pub use submit_kyc::{KycDocumentUpload, SubmitKycCommand, SubmitKycError, SubmitKycUseCase};

use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::domain::entities::KycTransitionError;
use crate::kyc::application::ports::outgoing::KycView;
use crate::storage::application::domain::UploadRejection;

//
// ──────────────────────────────────────────────────────────
// Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct KycDocumentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw form input; every field is optional here so that all missing
/// fields can be reported at once.
#[derive(Debug, Clone, Default)]
pub struct SubmitKycCommand {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub id_front: Option<KycDocumentUpload>,
    pub id_back: Option<KycDocumentUpload>,
    pub selfie: Option<KycDocumentUpload>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitKycError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid document '{field}': {reason}")]
    InvalidDocument {
        field: &'static str,
        reason: UploadRejection,
    },

    #[error("User not found")]
    UserNotFound,

    #[error("KYC already submitted and awaiting review")]
    AlreadySubmitted,

    #[error("KYC already verified")]
    AlreadyVerified,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<KycTransitionError> for SubmitKycError {
    fn from(e: KycTransitionError) -> Self {
        match e {
            KycTransitionError::AlreadySubmitted => SubmitKycError::AlreadySubmitted,
            KycTransitionError::AlreadyVerified => SubmitKycError::AlreadyVerified,
            other => SubmitKycError::RepositoryError(other.to_string()),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait SubmitKycUseCase: Send + Sync {
    async fn execute(&self, command: SubmitKycCommand) -> Result<KycView, SubmitKycError>;
}

use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::ports::outgoing::KycView;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectKycError {
    #[error("Rejection reason is required")]
    MissingReason,

    #[error("User not found")]
    UserNotFound,

    #[error("User has no KYC submission to reject")]
    NoSubmission,

    #[error("KYC already verified")]
    AlreadyVerified,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RejectKycUseCase: Send + Sync {
    async fn execute(
        &self,
        admin_id: UserId,
        user_id: UserId,
        reason: String,
    ) -> Result<KycView, RejectKycError>;
}

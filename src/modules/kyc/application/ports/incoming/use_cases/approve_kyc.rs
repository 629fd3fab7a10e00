use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::ports::outgoing::KycView;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApproveKycError {
    #[error("User not found")]
    UserNotFound,

    #[error("User has no KYC submission to approve")]
    NoSubmission,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ApproveKycUseCase: Send + Sync {
    /// Approving an already verified user returns the current record unchanged.
    async fn execute(
        &self,
        admin_id: UserId,
        user_id: UserId,
        admin_note: Option<String>,
    ) -> Result<KycView, ApproveKycError>;
}

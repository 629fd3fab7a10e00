use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::ports::outgoing::KycView;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetKycStatusError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetKycStatusUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<KycView, GetKycStatusError>;
}

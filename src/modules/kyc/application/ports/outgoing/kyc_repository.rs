use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};
use crate::kyc::application::domain::entities::KycRecord;

#[derive(Debug, Clone, thiserror::Error)]
pub enum KycRepositoryError {
    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Write side of the KYC workflow. The record lives on the user row.
#[async_trait]
pub trait KycRepository: Send + Sync {
    /// Replaces every KYC column of the user with `record`.
    async fn save_record(
        &self,
        user_id: UserId,
        record: &KycRecord,
    ) -> Result<User, KycRepositoryError>;
}

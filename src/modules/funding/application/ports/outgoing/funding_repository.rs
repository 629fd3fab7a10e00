use async_trait::async_trait;

use crate::funding::application::domain::entities::{FundingRequest, NewFundingRequest};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FundingRepositoryError {
    #[error("Funding request not found")]
    NotFound,

    #[error("Funding request is no longer pending")]
    NotPending,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait FundingRepository: Send + Sync {
    async fn insert(&self, request: NewFundingRequest)
        -> Result<FundingRequest, FundingRepositoryError>;

    /// Persists the review fields of a request whose stored status is still
    /// pending. A row reviewed in the meantime yields `NotPending`.
    async fn save_review(
        &self,
        request: &FundingRequest,
    ) -> Result<FundingRequest, FundingRepositoryError>;
}

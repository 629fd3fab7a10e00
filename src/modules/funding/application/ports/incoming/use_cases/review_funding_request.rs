use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::{FundingRequest, FundingReviewError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewFundingRequestError {
    #[error("Funding request not found")]
    NotFound,

    #[error("Funding request has already been reviewed")]
    AlreadyReviewed,

    #[error("Rejection reason is required")]
    MissingReason,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<FundingReviewError> for ReviewFundingRequestError {
    fn from(e: FundingReviewError) -> Self {
        match e {
            FundingReviewError::AlreadyReviewed => ReviewFundingRequestError::AlreadyReviewed,
            FundingReviewError::MissingReason => ReviewFundingRequestError::MissingReason,
        }
    }
}

#[async_trait]
pub trait ApproveFundingRequestUseCase: Send + Sync {
    async fn execute(
        &self,
        admin_id: UserId,
        request_id: Uuid,
        admin_note: Option<String>,
    ) -> Result<FundingRequest, ReviewFundingRequestError>;
}

#[async_trait]
pub trait RejectFundingRequestUseCase: Send + Sync {
    async fn execute(
        &self,
        admin_id: UserId,
        request_id: Uuid,
        reason: String,
    ) -> Result<FundingRequest, ReviewFundingRequestError>;
}

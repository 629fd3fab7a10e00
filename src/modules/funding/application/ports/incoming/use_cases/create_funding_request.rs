use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::{FundingKind, FundingRequest};

#[derive(Debug, Clone)]
pub struct CreateFundingRequestCommand {
    pub user_id: UserId,
    pub kind: FundingKind,
    pub amount_minor: i64,
    pub currency: String,
    pub method: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateFundingRequestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User not found")]
    UserNotFound,

    #[error("KYC verification is required for withdrawals")]
    KycRequired,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateFundingRequestUseCase: Send + Sync {
    async fn execute(
        &self,
        command: CreateFundingRequestCommand,
    ) -> Result<FundingRequest, CreateFundingRequestError>;
}

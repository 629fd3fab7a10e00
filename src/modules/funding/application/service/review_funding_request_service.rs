use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::FundingRequest;
use crate::funding::application::ports::incoming::use_cases::{
    ApproveFundingRequestUseCase, RejectFundingRequestUseCase, ReviewFundingRequestError,
};
use crate::funding::application::ports::outgoing::{
    FundingQuery, FundingRepository, FundingRepositoryError,
};

async fn load_pending<Q: FundingQuery>(
    query: &Q,
    request_id: Uuid,
) -> Result<FundingRequest, ReviewFundingRequestError> {
    query
        .find_by_id(request_id)
        .await
        .map_err(|e| ReviewFundingRequestError::QueryFailed(e.to_string()))?
        .ok_or(ReviewFundingRequestError::NotFound)
}

async fn persist<R: FundingRepository>(
    repository: &R,
    request: &FundingRequest,
) -> Result<FundingRequest, ReviewFundingRequestError> {
    repository.save_review(request).await.map_err(|e| match e {
        FundingRepositoryError::NotFound => ReviewFundingRequestError::NotFound,
        FundingRepositoryError::NotPending => ReviewFundingRequestError::AlreadyReviewed,
        FundingRepositoryError::DatabaseError(msg) => {
            ReviewFundingRequestError::RepositoryError(msg)
        }
    })
}

pub struct ApproveFundingRequestService<Q, R>
where
    Q: FundingQuery,
    R: FundingRepository,
{
    funding_query: Q,
    funding_repository: R,
}

impl<Q, R> ApproveFundingRequestService<Q, R>
where
    Q: FundingQuery,
    R: FundingRepository,
{
    pub fn new(funding_query: Q, funding_repository: R) -> Self {
        Self {
            funding_query,
            funding_repository,
        }
    }
}

#[async_trait]
impl<Q, R> ApproveFundingRequestUseCase for ApproveFundingRequestService<Q, R>
where
    Q: FundingQuery,
    R: FundingRepository,
{
    async fn execute(
        &self,
        admin_id: UserId,
        request_id: Uuid,
        admin_note: Option<String>,
    ) -> Result<FundingRequest, ReviewFundingRequestError> {
        let mut request = load_pending(&self.funding_query, request_id).await?;
        request.approve(admin_id.value(), admin_note, Utc::now())?;

        let saved = persist(&self.funding_repository, &request).await?;
        info!(request_id = %saved.id, admin_id = %admin_id, "Funding request approved");
        Ok(saved)
    }
}

pub struct RejectFundingRequestService<Q, R>
where
    Q: FundingQuery,
    R: FundingRepository,
{
    funding_query: Q,
    funding_repository: R,
}

impl<Q, R> RejectFundingRequestService<Q, R>
where
    Q: FundingQuery,
    R: FundingRepository,
{
    pub fn new(funding_query: Q, funding_repository: R) -> Self {
        Self {
            funding_query,
            funding_repository,
        }
    }
}

#[async_trait]
impl<Q, R> RejectFundingRequestUseCase for RejectFundingRequestService<Q, R>
where
    Q: FundingQuery,
    R: FundingRepository,
{
    async fn execute(
        &self,
        admin_id: UserId,
        request_id: Uuid,
        reason: String,
    ) -> Result<FundingRequest, ReviewFundingRequestError> {
        if reason.trim().is_empty() {
            return Err(ReviewFundingRequestError::MissingReason);
        }

        let mut request = load_pending(&self.funding_query, request_id).await?;
        request.reject(admin_id.value(), &reason, Utc::now())?;

        let saved = persist(&self.funding_repository, &request).await?;
        info!(request_id = %saved.id, admin_id = %admin_id, "Funding request rejected");
        Ok(saved)
    }
}

use async_trait::async_trait;
use tracing::{info, warn};

use crate::auth::application::ports::outgoing::UserQuery;
use crate::funding::application::domain::entities::{
    FundingKind, FundingRequest, NewFundingRequest,
};
use crate::funding::application::ports::incoming::use_cases::{
    CreateFundingRequestCommand, CreateFundingRequestError, CreateFundingRequestUseCase,
};
use crate::funding::application::ports::outgoing::FundingRepository;

const MAX_METHOD_LEN: usize = 50;
const MAX_REFERENCE_LEN: usize = 100;

pub struct CreateFundingRequestService<Q, R>
where
    Q: UserQuery,
    R: FundingRepository,
{
    user_query: Q,
    funding_repository: R,
}

impl<Q, R> CreateFundingRequestService<Q, R>
where
    Q: UserQuery,
    R: FundingRepository,
{
    pub fn new(user_query: Q, funding_repository: R) -> Self {
        Self {
            user_query,
            funding_repository,
        }
    }

    fn validate(
        command: CreateFundingRequestCommand,
    ) -> Result<NewFundingRequest, CreateFundingRequestError> {
        if command.amount_minor <= 0 {
            return Err(CreateFundingRequestError::InvalidInput(
                "amountMinor must be greater than zero".to_string(),
            ));
        }

        let currency = command.currency.trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CreateFundingRequestError::InvalidInput(
                "currency must be a 3-letter code".to_string(),
            ));
        }

        let method = command.method.trim().to_string();
        if method.is_empty() || method.len() > MAX_METHOD_LEN {
            return Err(CreateFundingRequestError::InvalidInput(format!(
                "method is required and must be at most {MAX_METHOD_LEN} characters"
            )));
        }

        let reference = command
            .reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if reference.as_ref().is_some_and(|r| r.len() > MAX_REFERENCE_LEN) {
            return Err(CreateFundingRequestError::InvalidInput(format!(
                "reference must be at most {MAX_REFERENCE_LEN} characters"
            )));
        }

        Ok(NewFundingRequest {
            user_id: command.user_id.value(),
            kind: command.kind,
            amount_minor: command.amount_minor,
            currency,
            method,
            reference,
        })
    }
}

#[async_trait]
impl<Q, R> CreateFundingRequestUseCase for CreateFundingRequestService<Q, R>
where
    Q: UserQuery,
    R: FundingRepository,
{
    async fn execute(
        &self,
        command: CreateFundingRequestCommand,
    ) -> Result<FundingRequest, CreateFundingRequestError> {
        let user_id = command.user_id;
        let new_request = Self::validate(command)?;

        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|e| CreateFundingRequestError::QueryFailed(e.to_string()))?
            .ok_or(CreateFundingRequestError::UserNotFound)?;

        if new_request.kind == FundingKind::Withdrawal && !user.kyc.verified {
            warn!(user_id = %user.id, "Withdrawal requested without verified KYC");
            return Err(CreateFundingRequestError::KycRequired);
        }

        let created = self
            .funding_repository
            .insert(new_request)
            .await
            .map_err(|e| CreateFundingRequestError::RepositoryError(e.to_string()))?;

        info!(
            request_id = %created.id,
            user_id = %created.user_id,
            kind = %created.kind,
            amount_minor = created.amount_minor,
            currency = %created.currency,
            "Funding request created"
        );
        Ok(created)
    }
}

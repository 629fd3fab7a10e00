use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::funding::application::domain::entities::FundingRequest;
use crate::funding::application::ports::incoming::use_cases::{
    ListFundingRequestsError, ListFundingRequestsUseCase, ListMyFundingRequestsUseCase,
};
use crate::funding::application::ports::outgoing::{FundingFilter, FundingQuery};
use crate::shared::{PageRequest, PageResult};

pub struct ListMyFundingRequestsService<Q: FundingQuery> {
    funding_query: Q,
}

impl<Q: FundingQuery> ListMyFundingRequestsService<Q> {
    pub fn new(funding_query: Q) -> Self {
        Self { funding_query }
    }
}

#[async_trait]
impl<Q: FundingQuery> ListMyFundingRequestsUseCase for ListMyFundingRequestsService<Q> {
    async fn execute(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FundingRequest>, ListFundingRequestsError> {
        self.funding_query
            .list_for_user(user_id)
            .await
            .map_err(|e| ListFundingRequestsError::QueryFailed(e.to_string()))
    }
}

pub struct ListFundingRequestsService<Q: FundingQuery> {
    funding_query: Q,
}

impl<Q: FundingQuery> ListFundingRequestsService<Q> {
    pub fn new(funding_query: Q) -> Self {
        Self { funding_query }
    }
}

#[async_trait]
impl<Q: FundingQuery> ListFundingRequestsUseCase for ListFundingRequestsService<Q> {
    async fn execute(
        &self,
        filter: FundingFilter,
        page: PageRequest,
    ) -> Result<PageResult<FundingRequest>, ListFundingRequestsError> {
        self.funding_query
            .list(filter, page)
            .await
            .map_err(|e| ListFundingRequestsError::QueryFailed(e.to_string()))
    }
}

use std::sync::Arc;

use crate::funding::application::ports::incoming::use_cases::{
    ApproveFundingRequestUseCase, CreateFundingRequestUseCase, ListFundingRequestsUseCase,
    ListMyFundingRequestsUseCase, RejectFundingRequestUseCase,
};

#[derive(Clone)]
pub struct FundingUseCases {
    pub create: Arc<dyn CreateFundingRequestUseCase + Send + Sync>,
    pub list_mine: Arc<dyn ListMyFundingRequestsUseCase + Send + Sync>,
    pub list_all: Arc<dyn ListFundingRequestsUseCase + Send + Sync>,
    pub approve: Arc<dyn ApproveFundingRequestUseCase + Send + Sync>,
    pub reject: Arc<dyn RejectFundingRequestUseCase + Send + Sync>,
}

mod create_funding_request;
mod list_funding_requests;
mod review_funding_request;

pub use create_funding_request::{
    CreateFundingRequestCommand, CreateFundingRequestError, CreateFundingRequestUseCase,
};
pub use list_funding_requests::{
    ListFundingRequestsError, ListFundingRequestsUseCase, ListMyFundingRequestsUseCase,
};
pub use review_funding_request::{
    ApproveFundingRequestUseCase, RejectFundingRequestUseCase, ReviewFundingRequestError,
};

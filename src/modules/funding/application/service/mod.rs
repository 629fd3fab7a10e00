mod create_funding_request_service;
mod list_funding_requests_service;
mod review_funding_request_service;

pub use create_funding_request_service::CreateFundingRequestService;
pub use list_funding_requests_service::{ListFundingRequestsService, ListMyFundingRequestsService};
pub use review_funding_request_service::{
    ApproveFundingRequestService, RejectFundingRequestService,
};

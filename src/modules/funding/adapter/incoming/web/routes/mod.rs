pub mod request_funding;
pub mod review_funding;

pub use request_funding::{
    my_funding_requests_handler, request_deposit_handler, request_withdrawal_handler,
};
pub use review_funding::{
    approve_funding_request_handler, list_funding_requests_handler,
    reject_funding_request_handler,
};

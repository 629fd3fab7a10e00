pub mod funding_requests;

pub mod funding_query;
pub mod funding_repository;

pub use funding_query::{FundingFilter, FundingQuery, FundingQueryError};
pub use funding_repository::{FundingRepository, FundingRepositoryError};

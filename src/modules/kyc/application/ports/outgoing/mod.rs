pub mod kyc_query;
pub mod kyc_repository;

pub use kyc_query::{KycQuery, KycQueryError, KycSubmissionSummary, KycView};
pub use kyc_repository::{KycRepository, KycRepositoryError};

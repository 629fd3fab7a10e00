pub mod kyc_query_postgres;
pub mod kyc_repository_postgres;

pub use kyc_query_postgres::KycQueryPostgres;
pub use kyc_repository_postgres::KycRepositoryPostgres;

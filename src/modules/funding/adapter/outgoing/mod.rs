pub mod funding_query_postgres;
pub mod funding_repository_postgres;
pub mod sea_orm_entity;

pub use funding_query_postgres::FundingQueryPostgres;
pub use funding_repository_postgres::FundingRepositoryPostgres;

pub mod api;
pub mod config;
pub mod pagination;

pub use pagination::{PageRequest, PageResult};

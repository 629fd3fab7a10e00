pub mod domain;
pub mod funding_use_cases;
pub mod ports;
pub mod service;

pub mod domain;
pub mod kyc_use_cases;
pub mod ports;
pub mod service;

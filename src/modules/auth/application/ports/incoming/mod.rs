pub mod password_policy;

pub mod log_sender;
pub mod smtp_sender;

pub use log_sender::LogEmailSender;
pub use smtp_sender::SmtpEmailSender;

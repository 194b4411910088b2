//! Domain-specific error types and error handling.

mod types;


pub use types::OtpError;

pub type OtpResult<T> = Result<T, OtpError>;

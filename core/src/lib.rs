//! # OTP Gateway Core
//!
//! Core business logic and domain layer for the OTP gateway.
//! This crate contains the OTP session entity, the session manager that
//! drives the verification lifecycle, the collaborator traits it calls out
//! to, and the error types shared with the transport layer.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;

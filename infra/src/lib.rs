//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the OTP session manager
//! depends on:
//! - **SMS**: code delivery through MSG91 or a logging mock
//! - **Relay**: forwarding verified form submissions to a downstream endpoint
//!
//! Both are selected from environment configuration at start-up.

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Configuration module for infrastructure services
pub mod config;

/// SMS service module - External SMS providers
pub mod sms;

/// Form relay module - Downstream submission endpoints
pub mod relay;

pub use config::{InfrastructureConfig, RelayConfig, SmsConfig};

/// Load infrastructure configuration from environment
///
/// A `.env` file in the working directory is honoured when present.
pub fn load_config() -> InfrastructureConfig {
    dotenvy::dotenv().ok();
    InfrastructureConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Form relay error
    #[error("Form relay error: {0}")]
    Relay(String),
}

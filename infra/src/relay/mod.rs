//! Form Relay Module
//!
//! Forwards verified form submissions to a downstream endpoint.
//!
//! - **HTTP relay**: url-encoded POST to the configured endpoint
//! - **Mock relay**: in-memory recorder for development and tests

pub mod http_relay;
pub mod mock_relay;

pub use http_relay::HttpFormRelay;
pub use mock_relay::MockFormRelay;

use otp_core::services::otp::FormRelayTrait;
use otp_shared::Environment;

use crate::InfrastructureError;

/// Create a form relay based on configuration
///
/// Uses the HTTP relay when an endpoint is configured. Outside production a
/// missing endpoint falls back to the mock, which only records submissions.
pub fn create_form_relay(
    config: &crate::config::RelayConfig,
    environment: Environment,
) -> Result<Box<dyn FormRelayTrait>, InfrastructureError> {
    match config.url.as_deref() {
        Some(url) => {
            let relay = HttpFormRelay::new(url, &config.user_agent, config.timeout_secs)?;
            Ok(Box::new(relay))
        }
        None if environment.is_production() => Err(InfrastructureError::Config(
            "FORM_RELAY_URL must be set in production".to_string(),
        )),
        None => {
            tracing::warn!("FORM_RELAY_URL not set, submissions will only be logged");
            Ok(Box::new(MockFormRelay::new()))
        }
    }
}

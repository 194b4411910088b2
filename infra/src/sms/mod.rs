//! SMS Service Module
//!
//! This module provides SMS service implementations for sending verification
//! codes. It includes the MSG91 provider and a mock implementation for
//! development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Log output for development
//! - **MSG91 Support**: Production OTP delivery via the MSG91 API
//! - **Security**: Phone number masking in logs

pub mod delivery_adapter;
pub mod mock_sms;
pub mod msg91;
pub mod sms_service;

// Re-export commonly used types
pub use delivery_adapter::SmsDeliveryAdapter;
pub use mock_sms::MockSmsService;
pub use msg91::{Msg91Config, Msg91SmsService};
pub use sms_service::{verification_message, SmsService};

use otp_shared::Environment;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Outside production, unknown providers and providers with missing
/// credentials fall back to the mock implementation with a warning. The
/// mock logs codes, so production refuses it.
pub fn create_sms_service(
    config: &crate::config::SmsConfig,
    environment: Environment,
) -> Result<Box<dyn SmsService>, InfrastructureError> {
    let fallback = |reason: String| -> Result<Box<dyn SmsService>, InfrastructureError> {
        if environment.is_production() {
            return Err(InfrastructureError::Config(reason));
        }
        tracing::warn!("{}, using mock SMS service", reason);
        Ok(Box::new(MockSmsService::with_ttl(config.code_ttl_minutes)))
    };

    match config.provider.as_str() {
        "mock" if environment.is_production() => Err(InfrastructureError::Config(
            "SMS_PROVIDER=mock is not allowed in production".to_string(),
        )),
        "mock" => Ok(Box::new(MockSmsService::with_ttl(config.code_ttl_minutes))),
        "msg91" => {
            match Msg91Config::from_sms_config(config).and_then(Msg91SmsService::new) {
                Ok(service) => Ok(Box::new(service)),
                Err(e) => {
                    tracing::error!("Failed to initialize MSG91 SMS service: {}", e);
                    fallback(format!("MSG91 unavailable: {e}"))
                }
            }
        }
        other => fallback(format!("Unknown SMS provider '{other}'")),
    }
}

/// Create the delivery collaborator for the session manager
pub fn create_delivery_service(
    config: &crate::config::SmsConfig,
    environment: Environment,
) -> Result<SmsDeliveryAdapter, InfrastructureError> {
    create_sms_service(config, environment).map(SmsDeliveryAdapter::new)
}

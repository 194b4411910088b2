//! SMS Delivery Trait Adapter
//!
//! Implements the core `OtpDeliveryTrait` over any infrastructure
//! [`SmsService`], bridging the provider implementations with the
//! session manager.

use async_trait::async_trait;
use otp_core::services::otp::OtpDeliveryTrait;

use super::sms_service::SmsService;

/// Adapter that implements the core OtpDeliveryTrait for an SMS service
pub struct SmsDeliveryAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsDeliveryAdapter {
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl OtpDeliveryTrait for SmsDeliveryAdapter {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(phone, code)
            .await
            .map_err(|e| e.to_string())
    }
}

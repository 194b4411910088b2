//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that handle
//! sending verification codes and other SMS messages.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - MSG91 OTP API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (`+91XXXXXXXXXX`)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS
    ///
    /// The default formats a plain-text message and hands it to
    /// [`SmsService::send_sms`]. Template-based providers override this.
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let message = verification_message(code, self.code_ttl_minutes());
        self.send_sms(phone_number, &message).await
    }

    /// Code lifetime quoted in verification messages
    fn code_ttl_minutes(&self) -> i64 {
        10
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Standard verification message text
pub fn verification_message(code: &str, ttl_minutes: i64) -> String {
    format!(
        "Your verification code is {}. It expires in {} minutes. Do not share it with anyone.",
        code, ttl_minutes
    )
}

//! Traits for OTP delivery and form relay integration

use async_trait::async_trait;

use super::types::FormSubmission;

/// Trait for OTP delivery integration (SMS gateways and mocks)
#[async_trait]
pub trait OtpDeliveryTrait: Send + Sync {
    /// Deliver a code to a canonical phone number; returns the provider message id
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Trait for relaying verified form submissions downstream
#[async_trait]
pub trait FormRelayTrait: Send + Sync {
    /// Forward a submission whose phone number has been verified
    async fn submit(&self, submission: &FormSubmission) -> Result<(), String>;
}

#[async_trait]
impl<T: OtpDeliveryTrait + ?Sized> OtpDeliveryTrait for Box<T> {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String> {
        (**self).send_code(phone, code).await
    }
}

#[async_trait]
impl<T: FormRelayTrait + ?Sized> FormRelayTrait for Box<T> {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), String> {
        (**self).submit(submission).await
    }
}

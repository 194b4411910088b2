//! Request and response bodies for the OTP endpoints
//!
//! Field names are camelCase on the wire. Missing string fields deserialize
//! as empty so they fail validation with a field-specific message instead of
//! a generic JSON error.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use otp_core::{CreatedSession, SessionView};
use otp_shared::utils::phone::is_valid_indian_mobile;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SendOtpRequest {
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 32, max = 64, message = "Invalid session ID"))]
    pub session_id: String,
    #[validate(custom(function = "validate_otp_code"))]
    pub otp_code: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ResendOtpRequest {
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    /// Session being replaced, if the client still has one
    #[validate(length(min = 32, max = 64, message = "Invalid session ID"))]
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitFormRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(length(min = 32, max = 64, message = "Invalid session ID"))]
    pub session_id: String,
}

impl SubmitFormRequest {
    /// Name with surrounding whitespace removed
    pub fn trimmed_name(&self) -> String {
        self.name.trim().to_string()
    }

    /// Email trimmed and lowercased
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Payload of send-otp and resend-otp responses
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
    /// Only present when diagnostic code exposure is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
}

impl From<CreatedSession> for OtpSentResponse {
    fn from(created: CreatedSession) -> Self {
        Self {
            session_id: created.session_id.to_string(),
            expires_at: created.expires_at,
            otp_code: created.debug_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub phone_number: String,
    pub verified_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormResponse {
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session: SessionView,
}

fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(validation_error("required", "Phone number is required"));
    }
    if !is_valid_indian_mobile(phone) {
        return Err(validation_error(
            "phone_format",
            "Please provide a valid Indian mobile number",
        ));
    }
    Ok(())
}

fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(validation_error("required", "OTP code is required"));
    }
    if code.len() != 6 {
        return Err(validation_error("length", "OTP must be 6 digits"));
    }
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(validation_error("numeric", "OTP must contain only numbers"));
    }
    Ok(())
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

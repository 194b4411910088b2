//! OTP session error types
//!
//! Every operation on the session manager fails with exactly one of these
//! kinds. Client-facing messages are the `Display` strings; upstream failures
//! carry the provider's reason for logging and expose a generic message via
//! [`OtpError::public_message`].

use otp_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Failures of the OTP session lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid or expired session. Please request a new OTP.")]
    NotFound,

    #[error("OTP has expired. Please request a new one.")]
    Expired,

    #[error("This session has already been verified.")]
    AlreadyVerified,

    #[error("Too many failed attempts. Please request a new OTP.")]
    TooManyAttempts,

    #[error("Invalid OTP. {remaining_attempts} attempts remaining.")]
    InvalidCode { remaining_attempts: u32 },

    #[error("Phone number not verified. Please complete verification first.")]
    NotVerified,

    #[error("Phone number mismatch. Please verify the correct number.")]
    PhoneMismatch,

    #[error("Session expired. Please verify your phone number again.")]
    ConsumeWindowExpired,

    #[error("Please provide a valid Indian mobile number")]
    InvalidPhoneFormat,

    #[error("OTP delivery failed: {reason}")]
    DeliveryFailed { reason: String },

    #[error("Form relay failed: {reason}")]
    RelayFailed { reason: String },
}

impl OtpError {
    /// Whether the caller can fix the request (as opposed to an upstream failure)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::DeliveryFailed { .. } | Self::RelayFailed { .. })
    }

    /// Whether hitting this error removes the session from the store
    pub fn evicts_session(&self) -> bool {
        matches!(
            self,
            Self::Expired | Self::TooManyAttempts | Self::ConsumeWindowExpired
        )
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => error_codes::SESSION_NOT_FOUND,
            Self::Expired => error_codes::SESSION_EXPIRED,
            Self::AlreadyVerified => error_codes::ALREADY_VERIFIED,
            Self::TooManyAttempts => error_codes::TOO_MANY_ATTEMPTS,
            Self::InvalidCode { .. } => error_codes::INVALID_CODE,
            Self::NotVerified => error_codes::NOT_VERIFIED,
            Self::PhoneMismatch => error_codes::PHONE_MISMATCH,
            Self::ConsumeWindowExpired => error_codes::CONSUME_WINDOW_EXPIRED,
            Self::InvalidPhoneFormat => error_codes::PHONE_INVALID,
            Self::DeliveryFailed { .. } => error_codes::DELIVERY_FAILED,
            Self::RelayFailed { .. } => error_codes::RELAY_FAILED,
        }
    }

    /// Message safe to show to end users
    ///
    /// Upstream reasons stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::DeliveryFailed { .. } => "Failed to send OTP. Please try again later.".to_string(),
            Self::RelayFailed { .. } => "Failed to submit form. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoErrorResponse for OtpError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.public_message());
        match self {
            Self::InvalidCode { remaining_attempts } => {
                response.add_detail("remainingAttempts", remaining_attempts)
            }
            _ => response,
        }
    }
}

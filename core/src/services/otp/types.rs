//! Types for OTP session manager results

use chrono::{DateTime, Utc};
use otp_shared::utils::phone::mask_phone_number;
use serde::Serialize;

use crate::domain::entities::otp_session::{OtpSession, SessionId};

/// Result of creating (or re-creating) a session
#[derive(Debug, Clone)]
pub struct CreatedSession {
    /// Identifier to hand back to the client
    pub session_id: SessionId,
    /// Canonical phone number the code was sent to
    pub phone: String,
    /// Verification deadline
    pub expires_at: DateTime<Utc>,
    /// Whether this session replaced an earlier one
    pub is_resend: bool,
    /// Message id reported by the delivery provider
    pub message_id: String,
    /// Raw code, only populated when code exposure is enabled
    pub debug_code: Option<String>,
}

/// A successfully verified phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPhone {
    pub session_id: SessionId,
    /// Canonical phone number
    pub phone: String,
    pub verified_at: DateTime<Utc>,
}

/// Non-sensitive projection of a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Masked phone number (`+91******3210`)
    pub phone_number: String,
    pub verified: bool,
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    pub is_resend: bool,
}

impl SessionView {
    pub fn from_session(session: &OtpSession) -> Self {
        Self {
            phone_number: mask_phone_number(&session.phone),
            verified: session.verified,
            attempts: session.attempts,
            created_at: session.created_at,
            expires_at: session.expires_at,
            verified_at: session.verified_at,
            is_resend: session.is_resend,
        }
    }
}

/// Form data forwarded downstream once the phone number is verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    /// Canonical phone number, filled in from the verified session
    pub phone: String,
    pub submitted_at: DateTime<Utc>,
}

impl FormSubmission {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            submitted_at: Utc::now(),
        }
    }
}

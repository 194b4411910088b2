//! Domain entities representing core business objects.

pub mod otp_session;

// Re-export commonly used types
pub use otp_session::{
    OtpSession, SessionId, SessionState, CODE_LENGTH, DEFAULT_CONSUME_WINDOW_MINUTES,
    DEFAULT_SESSION_TTL_MINUTES, MAX_ATTEMPTS,
};

//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    CleanupHandle, CleanupResult, CreatedSession, FormRelayTrait, FormSubmission,
    OtpDeliveryTrait, OtpSessionConfig, OtpSessionManager, SessionCleanupConfig,
    SessionCleanupService, SessionStore, SessionView, VerifiedPhone,
};

//! OTP session service module for phone number verification
//!
//! This module provides the full verification workflow:
//! - Code generation and delivery through an [`OtpDeliveryTrait`] collaborator
//! - Attempt-limited verification against an in-memory session store
//! - One-shot consumption of verified sessions by a downstream action
//! - Periodic sweeping of expired sessions

mod cleanup;
mod config;
mod service;
mod store;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupHandle, CleanupResult, SessionCleanupConfig, SessionCleanupService};
pub use config::OtpSessionConfig;
pub use service::OtpSessionManager;
pub use store::SessionStore;
pub use traits::{FormRelayTrait, OtpDeliveryTrait};
pub use types::{CreatedSession, FormSubmission, SessionView, VerifiedPhone};

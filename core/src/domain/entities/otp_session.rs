//! OTP session entity for phone number verification.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::errors::OtpError;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a pending session (10 minutes)
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 10;

/// Default window after verification during which a session can be consumed
pub const DEFAULT_CONSUME_WINDOW_MINUTES: i64 = 30;

/// Random bytes behind a session identifier (hex encoded to 64 chars)
const SESSION_ID_BYTES: usize = 32;

/// Opaque, unguessable session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh identifier from the OS random source
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a session at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Code issued, awaiting verification
    Pending,
    /// Code matched, awaiting consumption
    Verified,
    /// Past its deadline; no operation will succeed
    Expired,
}

/// A single pending or verified OTP verification
///
/// The code is kept private; it leaves the entity only through
/// [`OtpSession::code`] for delivery.
#[derive(Debug, Clone)]
pub struct OtpSession {
    /// Identifier handed to the client
    pub session_id: SessionId,

    /// Canonical phone number (`+91XXXXXXXXXX`)
    pub phone: String,

    code: String,

    /// Verification attempts made, successful or not
    pub attempts: u32,

    pub created_at: DateTime<Utc>,

    /// Deadline for verification
    pub expires_at: DateTime<Utc>,

    pub verified: bool,

    /// Set exactly when `verified` becomes true
    pub verified_at: Option<DateTime<Utc>>,

    /// Whether this session replaced an earlier one
    pub is_resend: bool,
}

impl OtpSession {
    /// Creates a new session with a random code, issued now
    ///
    /// # Arguments
    ///
    /// * `phone` - Canonical phone number the code is sent to
    /// * `ttl` - How long the code stays verifiable
    /// * `is_resend` - Whether the session replaces an earlier one
    pub fn new(phone: String, ttl: Duration, is_resend: bool) -> Self {
        Self::issued_at(phone, ttl, is_resend, Utc::now())
    }

    /// Creates a new session with a random code issued at `now`
    pub fn issued_at(phone: String, ttl: Duration, is_resend: bool, now: DateTime<Utc>) -> Self {
        Self {
            session_id: SessionId::generate(),
            phone,
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + ttl,
            verified: false,
            verified_at: None,
            is_resend,
        }
    }

    /// Generates a uniformly random 6-digit code from the OS random source
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// The code to deliver
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the verification deadline has passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the consume window of a verified session has closed
    ///
    /// Always `false` for sessions that are not verified.
    pub fn consume_window_closed_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.verified_at {
            Some(verified_at) if self.verified => now >= verified_at + window,
            _ => false,
        }
    }

    /// State of the session at `now`
    ///
    /// Verification lifts the `expires_at` deadline; a verified session
    /// expires only when its consume window closes.
    pub fn state_at(&self, now: DateTime<Utc>, consume_window: Duration) -> SessionState {
        if self.verified {
            if self.consume_window_closed_at(now, consume_window) {
                SessionState::Expired
            } else {
                SessionState::Verified
            }
        } else if self.is_expired_at(now) {
            SessionState::Expired
        } else {
            SessionState::Pending
        }
    }

    /// Remaining verification attempts
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Checks `input_code` against the stored code
    ///
    /// Every call that reaches the comparison counts as an attempt. Errors
    /// for which [`OtpError::evicts_session`] holds mean the caller must
    /// drop the session.
    pub fn verify(
        &mut self,
        input_code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<(), OtpError> {
        if self.verified {
            return Err(OtpError::AlreadyVerified);
        }

        if self.is_expired_at(now) {
            return Err(OtpError::Expired);
        }

        if self.attempts >= max_attempts {
            return Err(OtpError::TooManyAttempts);
        }

        self.attempts += 1;

        if constant_time_eq(self.code.as_bytes(), input_code.as_bytes()) {
            self.verified = true;
            self.verified_at = Some(now);
            return Ok(());
        }

        match self.remaining_attempts(max_attempts) {
            0 => Err(OtpError::TooManyAttempts),
            remaining_attempts => Err(OtpError::InvalidCode { remaining_attempts }),
        }
    }

    /// Checks that the session may be consumed for `phone` (canonical form)
    pub fn check_consumable(
        &self,
        phone: &str,
        now: DateTime<Utc>,
        consume_window: Duration,
    ) -> Result<(), OtpError> {
        if !self.verified {
            return Err(OtpError::NotVerified);
        }

        if self.phone != phone {
            return Err(OtpError::PhoneMismatch);
        }

        if self.consume_window_closed_at(now, consume_window) {
            return Err(OtpError::ConsumeWindowExpired);
        }

        Ok(())
    }

    /// Shift every timestamp into the past
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.created_at -= by;
        self.expires_at -= by;
        if let Some(verified_at) = self.verified_at.as_mut() {
            *verified_at -= by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+919876543210";

    fn session_at(now: DateTime<Utc>) -> OtpSession {
        OtpSession::issued_at(
            PHONE.to_string(),
            Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
            false,
            now,
        )
    }

    fn wrong_code(session: &OtpSession) -> String {
        if session.code() == "000000" {
            "111111".to_string()
        } else {
            "000000".to_string()
        }
    }

    #[test]
    fn test_new_session() {
        let now = Utc::now();
        let session = session_at(now);

        assert_eq!(session.phone, PHONE);
        assert_eq!(session.code().len(), CODE_LENGTH);
        assert_eq!(session.attempts, 0);
        assert!(!session.verified);
        assert!(session.verified_at.is_none());
        assert_eq!(session.expires_at - session.created_at, Duration::minutes(10));
        assert_eq!(session.session_id.as_str().len(), 64);
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = OtpSession::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_session_ids_are_unique() {
        let ids: std::collections::HashSet<_> =
            (0..100).map(|_| SessionId::generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_verify_success() {
        let now = Utc::now();
        let mut session = session_at(now);
        let code = session.code().to_string();

        let verified_at = now + Duration::minutes(1);
        assert!(session.verify(&code, verified_at, MAX_ATTEMPTS).is_ok());
        assert!(session.verified);
        assert_eq!(session.verified_at, Some(verified_at));
        assert_eq!(session.attempts, 1);
    }

    #[test]
    fn test_verify_wrong_code_counts_down() {
        let now = Utc::now();
        let mut session = session_at(now);
        let wrong = wrong_code(&session);

        assert_eq!(
            session.verify(&wrong, now, MAX_ATTEMPTS),
            Err(OtpError::InvalidCode {
                remaining_attempts: 2
            })
        );
        assert_eq!(
            session.verify(&wrong, now, MAX_ATTEMPTS),
            Err(OtpError::InvalidCode {
                remaining_attempts: 1
            })
        );
        assert_eq!(
            session.verify(&wrong, now, MAX_ATTEMPTS),
            Err(OtpError::TooManyAttempts)
        );
        assert_eq!(session.attempts, 3);

        // Correct code no longer helps
        let code = session.code().to_string();
        assert_eq!(
            session.verify(&code, now, MAX_ATTEMPTS),
            Err(OtpError::TooManyAttempts)
        );
        assert_eq!(session.attempts, 3);
    }

    #[test]
    fn test_verify_after_expiry() {
        let now = Utc::now();
        let mut session = session_at(now);
        let code = session.code().to_string();

        let at_deadline = session.expires_at;
        assert_eq!(
            session.verify(&code, at_deadline, MAX_ATTEMPTS),
            Err(OtpError::Expired)
        );
        assert_eq!(session.attempts, 0);
        assert!(!session.verified);
    }

    #[test]
    fn test_verify_twice() {
        let now = Utc::now();
        let mut session = session_at(now);
        let code = session.code().to_string();

        session.verify(&code, now, MAX_ATTEMPTS).unwrap();
        assert_eq!(
            session.verify(&code, now, MAX_ATTEMPTS),
            Err(OtpError::AlreadyVerified)
        );
        // Expiry no longer applies once verified
        assert_eq!(
            session.verify(&code, now + Duration::hours(1), MAX_ATTEMPTS),
            Err(OtpError::AlreadyVerified)
        );
    }

    #[test]
    fn test_state_transitions() {
        let now = Utc::now();
        let window = Duration::minutes(DEFAULT_CONSUME_WINDOW_MINUTES);
        let mut session = session_at(now);

        assert_eq!(session.state_at(now, window), SessionState::Pending);
        assert_eq!(
            session.state_at(now + Duration::minutes(10), window),
            SessionState::Expired
        );

        let code = session.code().to_string();
        let verified_at = now + Duration::minutes(9);
        session.verify(&code, verified_at, MAX_ATTEMPTS).unwrap();

        // Past expires_at but inside the consume window
        assert_eq!(
            session.state_at(now + Duration::minutes(20), window),
            SessionState::Verified
        );
        assert_eq!(
            session.state_at(verified_at + window, window),
            SessionState::Expired
        );
    }

    #[test]
    fn test_check_consumable() {
        let now = Utc::now();
        let window = Duration::minutes(DEFAULT_CONSUME_WINDOW_MINUTES);
        let mut session = session_at(now);

        assert_eq!(
            session.check_consumable(PHONE, now, window),
            Err(OtpError::NotVerified)
        );

        let code = session.code().to_string();
        session.verify(&code, now, MAX_ATTEMPTS).unwrap();

        assert!(session.check_consumable(PHONE, now, window).is_ok());
        assert_eq!(
            session.check_consumable("+919999999999", now, window),
            Err(OtpError::PhoneMismatch)
        );
        assert!(session
            .check_consumable(PHONE, now + Duration::minutes(29), window)
            .is_ok());
        assert_eq!(
            session.check_consumable(PHONE, now + Duration::minutes(30), window),
            Err(OtpError::ConsumeWindowExpired)
        );
    }

    #[test]
    fn test_backdate_moves_all_timestamps() {
        let now = Utc::now();
        let mut session = session_at(now);
        let code = session.code().to_string();
        session.verify(&code, now, MAX_ATTEMPTS).unwrap();

        session.backdate(Duration::minutes(5));
        assert_eq!(session.created_at, now - Duration::minutes(5));
        assert_eq!(session.verified_at, Some(now - Duration::minutes(5)));
    }
}

//! Configuration for the OTP session manager

use chrono::Duration;
use otp_shared::config::otp::clamp_lifetime;
use otp_shared::OtpConfig;

use crate::domain::entities::otp_session::{
    DEFAULT_CONSUME_WINDOW_MINUTES, DEFAULT_SESSION_TTL_MINUTES, MAX_ATTEMPTS,
};

use super::cleanup::SessionCleanupConfig;

/// Configuration for the OTP session manager
#[derive(Debug, Clone)]
pub struct OtpSessionConfig {
    /// Minutes a pending session accepts verification attempts
    pub session_ttl_minutes: i64,
    /// Minutes after verification during which the session can be consumed
    pub consume_window_minutes: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: u32,
    /// Return the raw code from create/resend (never enabled in production)
    pub expose_code: bool,
    /// Background sweeper settings
    pub cleanup: SessionCleanupConfig,
}

impl Default for OtpSessionConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            consume_window_minutes: DEFAULT_CONSUME_WINDOW_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            expose_code: false,
            cleanup: SessionCleanupConfig::default(),
        }
    }
}

impl OtpSessionConfig {
    /// Pending lifetime, clamped so deadline arithmetic cannot overflow
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(clamp_lifetime(self.session_ttl_minutes))
    }

    /// Consume window, clamped like `session_ttl`
    pub fn consume_window(&self) -> Duration {
        Duration::minutes(clamp_lifetime(self.consume_window_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_shared::config::otp::MAX_LIFETIME_MINUTES;

    #[test]
    fn test_oversized_lifetimes_do_not_overflow() {
        let config = OtpSessionConfig {
            session_ttl_minutes: i64::MAX,
            consume_window_minutes: i64::MAX,
            ..Default::default()
        };
        assert_eq!(config.session_ttl(), Duration::minutes(MAX_LIFETIME_MINUTES));
        assert_eq!(config.consume_window(), Duration::minutes(MAX_LIFETIME_MINUTES));
        assert!(chrono::Utc::now().checked_add_signed(config.session_ttl()).is_some());
    }
}

impl From<&OtpConfig> for OtpSessionConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            session_ttl_minutes: config.session_ttl_minutes,
            consume_window_minutes: config.consume_window_minutes,
            max_attempts: config.max_attempts,
            expose_code: config.expose_code,
            cleanup: SessionCleanupConfig {
                interval_seconds: config.sweep_interval_seconds,
                enabled: config.sweep_interval_seconds > 0,
            },
        }
    }
}

//! OTP session configuration

use serde::{Deserialize, Serialize};

use super::{env_or, Environment};

/// Upper bound for session lifetimes read from the environment (one week)
pub const MAX_LIFETIME_MINUTES: i64 = 7 * 24 * 60;

/// Lifetimes and limits applied to OTP verification sessions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a pending session accepts verification attempts
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,

    /// Minutes after verification during which the session may be consumed
    #[serde(default = "default_consume_window_minutes")]
    pub consume_window_minutes: i64,

    /// Verification attempts allowed per session
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds between background sweeps of expired sessions
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Return the raw code to callers (diagnostic mode, never in production)
    #[serde(default)]
    pub expose_code: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: default_session_ttl_minutes(),
            consume_window_minutes: default_consume_window_minutes(),
            max_attempts: default_max_attempts(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            expose_code: false,
        }
    }
}

impl OtpConfig {
    /// Load from `OTP_*` environment variables
    ///
    /// Lifetimes are clamped to `1..=MAX_LIFETIME_MINUTES`.
    /// `OTP_EXPOSE_CODE=true` is ignored in production.
    pub fn from_env(environment: Environment) -> Self {
        let defaults = Self::default();
        let expose_requested = env_or("OTP_EXPOSE_CODE", false);

        Self {
            session_ttl_minutes: clamp_lifetime(env_or(
                "OTP_SESSION_TTL_MINUTES",
                defaults.session_ttl_minutes,
            )),
            consume_window_minutes: clamp_lifetime(env_or(
                "OTP_CONSUME_WINDOW_MINUTES",
                defaults.consume_window_minutes,
            )),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            sweep_interval_seconds: env_or(
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            expose_code: Self::resolve_expose_code(environment, expose_requested),
        }
    }

    /// Diagnostic code exposure requires an explicit opt-in outside production
    pub fn resolve_expose_code(environment: Environment, requested: bool) -> bool {
        requested && !environment.is_production()
    }
}

/// Keep a configured lifetime in `1..=MAX_LIFETIME_MINUTES`
pub fn clamp_lifetime(minutes: i64) -> i64 {
    minutes.clamp(1, MAX_LIFETIME_MINUTES)
}

fn default_session_ttl_minutes() -> i64 {
    10
}

fn default_consume_window_minutes() -> i64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_sweep_interval_seconds() -> u64 {
    300 // 5 minutes
}

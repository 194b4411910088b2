//! Configuration management for infrastructure services
//!
//! Handles:
//! - SMS provider selection and credentials
//! - Form relay endpoint settings

use serde::{Deserialize, Serialize};

/// Default MSG91 API host
pub const MSG91_DEFAULT_BASE_URL: &str = "https://control.msg91.com";

/// User agent sent with relayed submissions
pub const DEFAULT_RELAY_USER_AGENT: &str = "Backend-OTP-Service/1.0";

/// Infrastructure configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfrastructureConfig {
    /// SMS service configuration
    pub sms: SmsConfig,
    /// Form relay configuration
    pub relay: RelayConfig,
}

impl InfrastructureConfig {
    pub fn from_env() -> Self {
        Self {
            sms: SmsConfig::from_env(),
            relay: RelayConfig::from_env(),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// SMS service provider ("msg91", "mock")
    pub provider: String,
    /// MSG91 auth key
    #[serde(skip_serializing)]
    pub auth_key: Option<String>,
    /// MSG91 OTP template id
    pub template_id: Option<String>,
    /// Provider API base URL
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// Code lifetime mentioned in plain-text messages
    pub code_ttl_minutes: i64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            auth_key: None,
            template_id: None,
            base_url: MSG91_DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            code_ttl_minutes: 10,
        }
    }
}

impl SmsConfig {
    /// Read `SMS_PROVIDER`, `MSG91_AUTH_KEY`, `MSG91_TEMPLATE_ID`,
    /// `MSG91_BASE_URL`, `SMS_REQUEST_TIMEOUT_SECS` and `OTP_SESSION_TTL_MINUTES`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER")
                .map(|p| p.trim().to_lowercase())
                .unwrap_or(defaults.provider),
            auth_key: non_empty_var("MSG91_AUTH_KEY"),
            template_id: non_empty_var("MSG91_TEMPLATE_ID"),
            base_url: non_empty_var("MSG91_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout_secs: parse_var("SMS_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            code_ttl_minutes: parse_var("OTP_SESSION_TTL_MINUTES")
                .unwrap_or(defaults.code_ttl_minutes),
        }
    }
}

/// Downstream form relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Endpoint receiving verified submissions; mock relay when unset
    pub url: Option<String>,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Timeout for relay requests in seconds
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: None,
            user_agent: DEFAULT_RELAY_USER_AGENT.to_string(),
            timeout_secs: 15,
        }
    }
}

impl RelayConfig {
    /// Read `FORM_RELAY_URL`, `FORM_RELAY_USER_AGENT` and `FORM_RELAY_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: non_empty_var("FORM_RELAY_URL"),
            user_agent: non_empty_var("FORM_RELAY_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout_secs: parse_var("FORM_RELAY_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    non_empty_var(key).and_then(|v| v.parse().ok())
}

//! MSG91 SMS Service Implementation
//!
//! Delivers verification codes through the MSG91 OTP API. The message body
//! comes from a template registered with MSG91, so only the code and the
//! recipient are sent.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use otp_shared::utils::phone::{mask_phone_number, normalize_phone_number};

use super::sms_service::SmsService;
use crate::config::SmsConfig;
use crate::InfrastructureError;

/// MSG91 SMS service configuration
#[derive(Debug, Clone)]
pub struct Msg91Config {
    /// Account auth key
    pub auth_key: String,
    /// Registered OTP template
    pub template_id: String,
    /// API host, without trailing path
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Msg91Config {
    /// Build from the generic SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let auth_key = config
            .auth_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("MSG91_AUTH_KEY not set".to_string()))?;
        let template_id = config
            .template_id
            .clone()
            .ok_or_else(|| InfrastructureError::Config("MSG91_TEMPLATE_ID not set".to_string()))?;

        Ok(Self {
            auth_key,
            template_id,
            base_url: config.base_url.clone(),
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Msg91Response {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// MSG91 SMS service implementation
pub struct Msg91SmsService {
    client: reqwest::Client,
    config: Msg91Config,
}

impl Msg91SmsService {
    /// Create a new MSG91 SMS service
    pub fn new(config: Msg91Config) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            template_id = %config.template_id,
            "MSG91 SMS service initialized"
        );

        Ok(Self { client, config })
    }

    /// OTP send endpoint
    pub fn otp_endpoint(&self) -> String {
        format!("{}/api/v5/otp", self.config.base_url.trim_end_matches('/'))
    }

    /// Query parameters for an OTP send; MSG91 wants the number without `+`
    pub fn otp_query(&self, phone_number: &str, code: &str) -> Vec<(&'static str, String)> {
        vec![
            ("template_id", self.config.template_id.clone()),
            ("mobile", normalize_phone_number(phone_number)),
            ("otp", code.to_string()),
        ]
    }
}

#[async_trait]
impl SmsService for Msg91SmsService {
    async fn send_sms(&self, _phone_number: &str, _message: &str) -> Result<String, InfrastructureError> {
        Err(InfrastructureError::Sms(
            "MSG91 delivers codes through OTP templates; free-form messages are not supported"
                .to_string(),
        ))
    }

    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(phone_number);
        debug!(phone = %masked, "Sending OTP via MSG91");

        // Strip the URL from transport errors; its query carries the phone number
        let response = self
            .client
            .post(self.otp_endpoint())
            .header("authkey", &self.config.auth_key)
            .query(&self.otp_query(phone_number, code))
            .send()
            .await
            .map_err(|e| InfrastructureError::Http(e.without_url()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(
                phone = %masked,
                status = status.as_u16(),
                body = %body,
                "MSG91 request failed"
            );
            return Err(InfrastructureError::Sms(format!(
                "MSG91 returned HTTP {}",
                status.as_u16()
            )));
        }

        let parsed: Msg91Response = serde_json::from_str(&body).map_err(|e| {
            error!(phone = %masked, error = %e, body = %body, "Unexpected MSG91 response");
            InfrastructureError::Sms("Unexpected MSG91 response".to_string())
        })?;

        if parsed.kind != "success" {
            error!(
                phone = %masked,
                reason = parsed.message.as_deref().unwrap_or("unknown"),
                "MSG91 rejected OTP request"
            );
            return Err(InfrastructureError::Sms(
                "MSG91 rejected the OTP request".to_string(),
            ));
        }

        let message_id = parsed.request_id.unwrap_or_else(|| "msg91".to_string());
        info!(phone = %masked, message_id = %message_id, "OTP sent via MSG91");
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "MSG91"
    }
}

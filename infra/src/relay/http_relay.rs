//! HTTP form relay
//!
//! Posts verified submissions as `application/x-www-form-urlencoded` with
//! the verification flags the downstream endpoint expects.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, info};

use otp_core::services::otp::{FormRelayTrait, FormSubmission};
use otp_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Relay posting submissions to a fixed endpoint
pub struct HttpFormRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFormRelay {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Form fields sent for a submission
    pub fn form_fields(submission: &FormSubmission) -> Vec<(&'static str, String)> {
        vec![
            ("name", submission.name.clone()),
            ("email", submission.email.clone()),
            ("number", submission.phone.clone()),
            ("verified_phone", "true".to_string()),
            ("backend_verified", "true".to_string()),
            ("submission_timestamp", submission.submitted_at.to_rfc3339()),
        ]
    }

    async fn post(&self, submission: &FormSubmission) -> Result<(), InfrastructureError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&Self::form_fields(submission))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %body,
                "Form relay endpoint rejected submission"
            );
            return Err(InfrastructureError::Relay(format!(
                "endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl FormRelayTrait for HttpFormRelay {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), String> {
        self.post(submission).await.map_err(|e| e.to_string())?;

        info!(
            phone = %mask_phone_number(&submission.phone),
            "Form submission relayed"
        );
        Ok(())
    }
}

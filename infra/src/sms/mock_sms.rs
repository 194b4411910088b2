//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS service for development and testing.
//! Messages are logged instead of sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use otp_shared::utils::phone::{is_valid_indian_mobile, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs SMS messages (the only place a code is ever logged)
/// - Generates mock message IDs
/// - Tracks message count and the last message per phone for tests
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last message body per phone number
    last_messages: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    code_ttl_minutes: i64,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::with_ttl(10)
    }

    /// Create a mock service quoting `code_ttl_minutes` in its messages
    pub fn with_ttl(code_ttl_minutes: i64) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_messages: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: Arc::new(AtomicBool::new(false)),
            code_ttl_minutes,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last message sent to `phone_number`
    pub fn last_message(&self, phone_number: &str) -> Option<String> {
        self.last_messages
            .lock()
            .ok()
            .and_then(|messages| messages.get(phone_number).cloned())
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(phone_number);

        if !is_valid_indian_mobile(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked, "Mock SMS service simulating failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut messages) = self.last_messages.lock() {
            messages.insert(phone_number.to_string(), message.to_string());
        }

        info!(
            phone = %masked,
            message_id = %message_id,
            message = %message,
            "[MOCK SMS] Message sent"
        );

        Ok(message_id)
    }

    fn code_ttl_minutes(&self) -> i64 {
        self.code_ttl_minutes
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

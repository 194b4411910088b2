//! Mock form relay for development and testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use otp_core::services::otp::{FormRelayTrait, FormSubmission};
use otp_shared::utils::phone::mask_phone_number;

/// Records submissions in memory instead of forwarding them
#[derive(Clone, Default)]
pub struct MockFormRelay {
    submissions: Arc<Mutex<Vec<FormSubmission>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockFormRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions received so far
    pub fn submissions(&self) -> Vec<FormSubmission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl FormRelayTrait for MockFormRelay {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), String> {
        let masked = mask_phone_number(&submission.phone);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked, "Mock form relay simulating failure");
            return Err("Simulated relay failure".to_string());
        }

        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(submission.clone());
        }
        info!(phone = %masked, "[MOCK RELAY] Form submission recorded");
        Ok(())
    }
}

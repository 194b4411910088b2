//! Session lifecycle through the public API only

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use otp_core::{
    FormRelayTrait, FormSubmission, OtpDeliveryTrait, OtpError, OtpSessionConfig,
    OtpSessionManager,
};

#[derive(Default)]
struct RecordingDelivery {
    codes: Mutex<Vec<(String, String)>>,
}

impl RecordingDelivery {
    fn last_code(&self) -> String {
        self.codes.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl OtpDeliveryTrait for RecordingDelivery {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let mut codes = self.codes.lock().unwrap();
        codes.push((phone.to_string(), code.to_string()));
        Ok(format!("msg-{}", codes.len()))
    }
}

#[derive(Default)]
struct NullRelay;

#[async_trait]
impl FormRelayTrait for NullRelay {
    async fn submit(&self, _submission: &FormSubmission) -> Result<(), String> {
        Ok(())
    }
}

fn manager() -> (
    Arc<RecordingDelivery>,
    OtpSessionManager<RecordingDelivery, NullRelay>,
) {
    let delivery = Arc::new(RecordingDelivery::default());
    let manager = OtpSessionManager::new(
        Arc::clone(&delivery),
        Arc::new(NullRelay),
        OtpSessionConfig::default(),
    );
    (delivery, manager)
}

#[tokio::test]
async fn test_consume_runs_custom_action_once() {
    let (delivery, manager) = manager();

    let created = manager.create("98765-43210").await.unwrap();
    assert_eq!(created.phone, "+919876543210");
    assert!(created.debug_code.is_none());

    let code = delivery.last_code();
    manager.verify(&created.session_id, &code).await.unwrap();

    let phone = manager
        .consume(&created.session_id, "9876543210", |verified| async move {
            Ok(verified.phone)
        })
        .await
        .unwrap();
    assert_eq!(phone, "+919876543210");

    let again = manager
        .consume(&created.session_id, "9876543210", |verified| async move {
            Ok(verified.phone)
        })
        .await;
    assert_eq!(again, Err(OtpError::NotFound));
}

#[tokio::test]
async fn test_failed_action_leaves_session_consumable() {
    let (delivery, manager) = manager();

    let created = manager.create("9876543210").await.unwrap();
    manager
        .verify(&created.session_id, &delivery.last_code())
        .await
        .unwrap();

    let failed: Result<(), OtpError> = manager
        .consume(&created.session_id, "9876543210", |_| async {
            Err(OtpError::RelayFailed {
                reason: "downstream unavailable".to_string(),
            })
        })
        .await;
    assert!(matches!(failed, Err(OtpError::RelayFailed { .. })));

    let view = manager.inspect(&created.session_id).await.unwrap();
    assert!(view.verified);

    manager
        .consume(&created.session_id, "9876543210", |_| async { Ok(()) })
        .await
        .unwrap();
    assert_eq!(manager.active_sessions().await, 0);
}

#[tokio::test]
async fn test_invalid_phone_is_rejected_before_delivery() {
    let (delivery, manager) = manager();

    let result = manager.create("+1 415 555 0100").await;
    assert_eq!(result.unwrap_err(), OtpError::InvalidPhoneFormat);
    assert!(delivery.codes.lock().unwrap().is_empty());
}

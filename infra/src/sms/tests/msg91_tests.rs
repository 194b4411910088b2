//! Unit tests for the MSG91 SMS service

use crate::config::SmsConfig;
use crate::sms::{Msg91Config, Msg91SmsService, SmsService};
use crate::InfrastructureError;

fn config(base_url: &str) -> Msg91Config {
    Msg91Config {
        auth_key: "test-key".to_string(),
        template_id: "tmpl-1".to_string(),
        base_url: base_url.to_string(),
        request_timeout_secs: 2,
    }
}

#[test]
fn test_config_requires_credentials() {
    let missing_key = SmsConfig {
        template_id: Some("tmpl".to_string()),
        ..Default::default()
    };
    match Msg91Config::from_sms_config(&missing_key) {
        Err(InfrastructureError::Config(msg)) => assert!(msg.contains("MSG91_AUTH_KEY")),
        other => panic!("expected config error, got {:?}", other.map(|_| ())),
    }

    let missing_template = SmsConfig {
        auth_key: Some("key".to_string()),
        ..Default::default()
    };
    assert!(Msg91Config::from_sms_config(&missing_template).is_err());
}

#[test]
fn test_endpoint_and_query() {
    let service = Msg91SmsService::new(config("https://control.msg91.com/")).unwrap();

    assert_eq!(service.otp_endpoint(), "https://control.msg91.com/api/v5/otp");

    let query = service.otp_query("+919876543210", "123456");
    assert!(query.contains(&("template_id", "tmpl-1".to_string())));
    assert!(query.contains(&("mobile", "919876543210".to_string())));
    assert!(query.contains(&("otp", "123456".to_string())));
    // Auth key travels in a header, never in the URL
    assert!(query.iter().all(|(k, _)| *k != "authkey"));
}

#[tokio::test]
async fn test_free_form_sms_not_supported() {
    let service = Msg91SmsService::new(config("https://control.msg91.com")).unwrap();
    assert!(service.send_sms("+919876543210", "hi").await.is_err());
}

#[tokio::test]
async fn test_unreachable_provider_is_an_error() {
    // Nothing listens on port 9 of the loopback interface
    let service = Msg91SmsService::new(config("http://127.0.0.1:9")).unwrap();
    let err = service
        .send_verification_code("+919876543210", "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, InfrastructureError::Http(_)));
    assert!(!err.to_string().contains("9876543210"));
}

//! Unit tests for SMS service creation

use otp_core::services::otp::OtpDeliveryTrait;
use otp_shared::Environment;

use crate::config::SmsConfig;
use crate::sms::{create_delivery_service, create_sms_service};
use crate::InfrastructureError;

fn msg91_config(auth_key: Option<&str>) -> SmsConfig {
    SmsConfig {
        provider: "msg91".to_string(),
        auth_key: auth_key.map(str::to_string),
        template_id: Some("tmpl".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_create_mock_service() {
    let service = create_sms_service(&SmsConfig::default(), Environment::Development).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_unknown_provider_fallback() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..Default::default()
    };
    let service = create_sms_service(&config, Environment::Staging).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_msg91_without_credentials_falls_back_to_mock() {
    let service = create_sms_service(&msg91_config(None), Environment::Development).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_msg91_with_credentials() {
    let service = create_sms_service(&msg91_config(Some("key")), Environment::Production).unwrap();
    assert_eq!(service.provider_name(), "MSG91");
}

#[test]
fn test_production_rejects_mock_provider() {
    let result = create_sms_service(&SmsConfig::default(), Environment::Production);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_production_rejects_missing_msg91_credentials() {
    match create_sms_service(&msg91_config(None), Environment::Production) {
        Err(InfrastructureError::Config(message)) => {
            assert!(message.contains("MSG91_AUTH_KEY"))
        }
        _ => panic!("expected a configuration error"),
    }
}

#[test]
fn test_production_rejects_unknown_provider() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..Default::default()
    };
    let result = create_delivery_service(&config, Environment::Production);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_delivery_adapter_sends_through_mock() {
    let delivery = create_delivery_service(&SmsConfig::default(), Environment::Development).unwrap();
    assert_eq!(delivery.provider_name(), "Mock");

    let message_id = delivery.send_code("+919876543210", "123456").await.unwrap();
    assert!(message_id.starts_with("mock-"));
}

#[tokio::test]
async fn test_delivery_adapter_maps_errors_to_strings() {
    let delivery = create_delivery_service(&SmsConfig::default(), Environment::Development).unwrap();
    let err = delivery.send_code("12345", "123456").await.unwrap_err();
    assert!(err.contains("Invalid phone number format"));
}

//! Unit tests for SMS service creation

use lp_shared::SmsConfig;

use crate::sms::create_sms_service;
use crate::InfrastructureError;

#[test]
fn test_create_mock_service() {
    let service = create_sms_service(&SmsConfig::default()).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_unknown_provider_is_rejected() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..SmsConfig::default()
    };

    assert!(matches!(
        create_sms_service(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_twilio_without_credentials_is_rejected() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        ..SmsConfig::default()
    };

    assert!(create_sms_service(&config).is_err());
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_create_twilio_service() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "ACtest".to_string(),
        auth_token: "token".to_string(),
        from_number: "+15551234567".to_string(),
        ..SmsConfig::default()
    };

    let service = create_sms_service(&config).unwrap();
    assert_eq!(service.provider_name(), "Twilio");
}

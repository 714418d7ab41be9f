//! Unit tests for verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::clock::{Clock, ManualClock};
use crate::domain::entities::{OtpCode, CODE_LENGTH};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{MockOtpRepository, OtpRepository};
use crate::services::verification::mocks::{MockSmsSender, QueuedCodeGenerator};
use crate::services::verification::{
    CodeGenerator, SecureCodeGenerator, VerificationService, VerificationServiceConfig,
};

struct Harness {
    service: VerificationService<MockOtpRepository, MockSmsSender>,
    repo: Arc<MockOtpRepository>,
    sms: Arc<MockSmsSender>,
    generator: Arc<QueuedCodeGenerator>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let repo = Arc::new(MockOtpRepository::new());
    let sms = Arc::new(MockSmsSender::new(false));
    let generator = Arc::new(QueuedCodeGenerator::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let service = VerificationService::new(
        repo.clone(),
        sms.clone(),
        generator.clone(),
        clock.clone(),
        VerificationServiceConfig::default(),
    );
    Harness {
        service,
        repo,
        sms,
        generator,
        clock,
    }
}

fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::parse(raw).unwrap()
}

#[test]
fn test_secure_code_format() {
    for _ in 0..200 {
        let code = SecureCodeGenerator.generate();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_secure_codes_vary() {
    let codes: std::collections::HashSet<String> =
        (0..50).map(|_| SecureCodeGenerator::generate_secure_code()).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_parse_phone_uses_configured_country() {
    let h = harness();
    assert_eq!(h.service.parse_phone("333 1234567").unwrap().as_str(), "+393331234567");
    assert!(matches!(
        h.service.parse_phone(""),
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_send_code_stores_and_delivers() {
    let h = harness();
    h.generator.push("012345");

    let result = h.service.send_code(&phone("3331234567")).await.unwrap();

    assert_eq!(result.otp.code, "012345");
    assert_eq!(result.otp.phone_number, "+393331234567");
    assert_eq!(result.expires_at, h.clock.now() + Duration::minutes(10));
    assert!(result.message_id.starts_with("mock-msg-"));
    assert_eq!(h.sms.get_sent_code("+393331234567").as_deref(), Some("012345"));
    assert_eq!(h.repo.rows().await.len(), 1);
}

#[tokio::test]
async fn test_send_code_sms_failure_keeps_row() {
    let h = harness();
    h.sms.set_failing(true);

    let result = h.service.send_code(&phone("3331234567")).await;

    match result {
        Err(DomainError::Dependency { service, .. }) => assert_eq!(service, "sms"),
        other => panic!("Expected SMS dependency failure, got {:?}", other),
    }
    // The row was issued before delivery; the next send replaces it
    assert_eq!(h.repo.rows().await.len(), 1);
}

#[tokio::test]
async fn test_send_code_store_failure_skips_sms() {
    let h = harness();
    h.repo.set_failing(true).await;

    let result = h.service.send_code(&phone("3331234567")).await;

    assert!(matches!(result, Err(DomainError::Dependency { .. })));
    assert_eq!(h.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_only_latest_code_is_live() {
    let h = harness();
    let p = phone("3331234567");
    h.generator.push("111111");
    h.generator.push("222222");

    h.service.send_code(&p).await.unwrap();
    h.service.send_code(&p).await.unwrap();

    assert!(matches!(
        h.service.validate(&p, "111111").await,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
    assert!(h.service.validate(&p, "222222").await.is_ok());
}

#[tokio::test]
async fn test_expiry_boundary() {
    let h = harness();
    let p = phone("3331234567");
    h.generator.push("123456");
    h.service.send_code(&p).await.unwrap();

    h.clock.advance(Duration::seconds(9 * 60 + 59));
    assert!(h.service.validate(&p, "123456").await.is_ok());

    h.clock.advance(Duration::seconds(62));
    assert!(matches!(
        h.service.validate(&p, "123456").await,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
    // Expired rows are left for the next issue to clean up
    assert_eq!(h.repo.rows().await.len(), 1);
}

#[tokio::test]
async fn test_phone_variants_are_equivalent() {
    let h = harness();
    h.generator.push("654321");
    h.service.send_code(&phone("3331234567")).await.unwrap();

    assert!(h.service.validate(&phone("+393331234567"), "654321").await.is_ok());
}

#[tokio::test]
async fn test_validate_accepts_legacy_row() {
    let h = harness();
    let p = phone("3331234567");
    let mut legacy = OtpCode::new(&p, "777777", h.clock.now());
    legacy.phone_number = "3331234567".to_string();
    h.repo.insert_raw(legacy).await;

    assert!(h.service.validate(&p, "777777").await.is_ok());
}

#[tokio::test]
async fn test_malformed_code_is_rejected_without_lookup() {
    let h = harness();
    let p = phone("3331234567");
    h.repo.set_failing(true).await;

    for code in ["", "12345", "1234567", "abcdef"] {
        assert!(matches!(
            h.service.validate(&p, code).await,
            Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
        ));
    }
}

#[tokio::test]
async fn test_consume_prevents_replay() {
    let h = harness();
    let p = phone("3331234567");
    h.generator.push("123456");
    h.service.send_code(&p).await.unwrap();

    let otp = h.service.validate(&p, "123456").await.unwrap();
    h.service.consume(&otp).await.unwrap();

    assert!(matches!(
        h.service.validate(&p, "123456").await,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
    assert!(h.repo.find(&p, "123456").await.unwrap().is_none());
}

#[tokio::test]
async fn test_second_consume_of_validated_code_is_rejected() {
    let h = harness();
    let p = phone("3331234567");
    h.generator.push("123456");
    h.service.send_code(&p).await.unwrap();

    // Both callers validated before either consumed
    let first = h.service.validate(&p, "123456").await.unwrap();
    let second = h.service.validate(&p, "123456").await.unwrap();

    assert!(h.service.consume(&first).await.is_ok());
    assert!(matches!(
        h.service.consume(&second).await,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
}

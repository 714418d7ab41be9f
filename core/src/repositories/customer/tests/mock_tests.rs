//! Unit tests for the in-memory customer repository

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{AuthIdentity, Customer, OtpCode};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{AuthError, DomainError};
use crate::repositories::customer::{CustomerRepository, MockCustomerRepository};
use crate::repositories::identity::MockIdentityRepository;
use crate::repositories::otp::{MockOtpRepository, OtpRepository};

fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::parse(raw).unwrap()
}

#[tokio::test]
async fn test_find_by_phone_tolerates_stored_variants() {
    let repo = MockCustomerRepository::new();
    let mut legacy = Customer::new(&phone("3331234567"));
    legacy.phone_number = "3331234567".to_string();
    repo.insert(legacy.clone()).await;

    let found = repo.find_by_phone(&phone("+39 333 1234567")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, legacy.id);
}

#[tokio::test]
async fn test_find_by_phone_returns_every_match() {
    let repo = MockCustomerRepository::new();
    repo.insert(Customer::new(&phone("3331234567"))).await;
    let mut duplicate = Customer::new(&phone("3331234567"));
    duplicate.phone_number = "393331234567".to_string();
    repo.insert(duplicate).await;

    let found = repo.find_by_phone(&phone("3331234567")).await.unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_mark_verified() {
    let repo = MockCustomerRepository::new();
    let customer = Customer::new(&phone("3331234567"));
    repo.insert(customer.clone()).await;

    assert!(repo.mark_verified(customer.id, Utc::now()).await.unwrap());
    assert!(repo.get(customer.id).await.unwrap().is_verified);
    assert!(!repo.mark_verified(Uuid::new_v4(), Utc::now()).await.unwrap());
}

#[tokio::test]
async fn test_change_phone_updates_customer_and_identity() {
    let identities = MockIdentityRepository::new();
    let repo = MockCustomerRepository::with_identities(identities.clone());
    let auth_id = Uuid::new_v4();
    identities
        .insert(AuthIdentity::new(auth_id).with_phone("+393331234567"))
        .await;
    let customer = Customer::new(&phone("3331234567")).with_auth_id(auth_id);
    repo.insert(customer.clone()).await;

    let updated = repo
        .change_phone(customer.id, &phone("3339876543"), Uuid::new_v4(), Utc::now())
        .await
        .unwrap();

    assert_eq!(updated.phone_number, "+393339876543");
    assert_eq!(
        identities.get(auth_id).await.unwrap().phone.as_deref(),
        Some("+393339876543")
    );
    assert_eq!(repo.find_by_auth_id(auth_id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_change_phone_rolls_back_when_identity_update_fails() {
    let identities = MockIdentityRepository::new();
    let repo = MockCustomerRepository::with_identities(identities.clone());
    let auth_id = Uuid::new_v4();
    identities
        .insert(AuthIdentity::new(auth_id).with_phone("+393331234567"))
        .await;
    let customer = Customer::new(&phone("3331234567")).with_auth_id(auth_id);
    repo.insert(customer.clone()).await;
    identities.fail_phone_update(true).await;

    let result = repo
        .change_phone(customer.id, &phone("3339876543"), Uuid::new_v4(), Utc::now())
        .await;

    assert!(matches!(result, Err(DomainError::Dependency { .. })));
    assert_eq!(
        repo.get(customer.id).await.unwrap().phone_number,
        "+393331234567"
    );
    assert_eq!(
        identities.get(auth_id).await.unwrap().phone.as_deref(),
        Some("+393331234567")
    );
}

#[tokio::test]
async fn test_change_phone_rejects_taken_number() {
    let repo = MockCustomerRepository::new();
    let me = Customer::new(&phone("3331234567"));
    let other = Customer::new(&phone("3339876543"));
    repo.insert(me.clone()).await;
    repo.insert(other).await;

    let result = repo
        .change_phone(me.id, &phone("+393339876543"), Uuid::new_v4(), Utc::now())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PhoneAlreadyInUse))
    ));
}

#[tokio::test]
async fn test_change_phone_unknown_customer() {
    let repo = MockCustomerRepository::new();
    let result = repo
        .change_phone(Uuid::new_v4(), &phone("3331234567"), Uuid::new_v4(), Utc::now())
        .await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
}

#[tokio::test]
async fn test_change_phone_deletes_authorizing_code() {
    let otps = MockOtpRepository::new();
    let repo = MockCustomerRepository::new().with_otps(otps.clone());
    let customer = Customer::new(&phone("3331234567"));
    repo.insert(customer.clone()).await;
    let new_phone = phone("3339876543");
    let otp = OtpCode::new(&new_phone, "135790", Utc::now());
    otps.issue(&new_phone, &otp).await.unwrap();

    repo.change_phone(customer.id, &new_phone, otp.id, Utc::now())
        .await
        .unwrap();

    assert!(otps.rows().await.is_empty());
}

#[tokio::test]
async fn test_change_phone_with_redeemed_code_changes_nothing() {
    let otps = MockOtpRepository::new();
    let repo = MockCustomerRepository::new().with_otps(otps.clone());
    let customer = Customer::new(&phone("3331234567"));
    repo.insert(customer.clone()).await;

    let result = repo
        .change_phone(customer.id, &phone("3339876543"), Uuid::new_v4(), Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
    assert_eq!(
        repo.get(customer.id).await.unwrap().phone_number,
        "+393331234567"
    );
}

#[tokio::test]
async fn test_change_phone_restores_code_when_identity_update_fails() {
    let identities = MockIdentityRepository::new();
    let otps = MockOtpRepository::new();
    let repo = MockCustomerRepository::with_identities(identities.clone()).with_otps(otps.clone());
    let auth_id = Uuid::new_v4();
    identities
        .insert(AuthIdentity::new(auth_id).with_phone("+393331234567"))
        .await;
    let customer = Customer::new(&phone("3331234567")).with_auth_id(auth_id);
    repo.insert(customer.clone()).await;
    let new_phone = phone("3339876543");
    let otp = OtpCode::new(&new_phone, "135790", Utc::now());
    otps.issue(&new_phone, &otp).await.unwrap();
    identities.fail_phone_update(true).await;

    let result = repo
        .change_phone(customer.id, &new_phone, otp.id, Utc::now())
        .await;

    assert!(matches!(result, Err(DomainError::Dependency { .. })));
    assert_eq!(otps.rows().await, vec![otp]);
}

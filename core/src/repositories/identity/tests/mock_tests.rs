//! Unit tests for the in-memory identity repository

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::AuthIdentity;
use crate::domain::value_objects::PhoneNumber;
use crate::repositories::identity::{IdentityRepository, MockIdentityRepository};

#[tokio::test]
async fn test_confirm_phone_sets_timestamp() {
    let repo = MockIdentityRepository::new();
    let id = Uuid::new_v4();
    repo.insert(AuthIdentity::new(id)).await;
    let phone = PhoneNumber::parse("3331234567").unwrap();
    let at = Utc::now();

    assert!(repo.confirm_phone(id, &phone, at).await.unwrap());

    let identity = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(identity.phone.as_deref(), Some("+393331234567"));
    assert_eq!(identity.phone_confirmed_at, Some(at));
    assert!(identity.is_phone_confirmed());
}

#[tokio::test]
async fn test_confirm_phone_failure_switch() {
    let repo = MockIdentityRepository::new();
    let id = Uuid::new_v4();
    repo.insert(AuthIdentity::new(id)).await;
    repo.fail_confirm_phone(true).await;

    let phone = PhoneNumber::parse("3331234567").unwrap();
    assert!(repo.confirm_phone(id, &phone, Utc::now()).await.is_err());
    assert!(!repo.get(id).await.unwrap().is_phone_confirmed());
}

#[tokio::test]
async fn test_update_password_hash() {
    let repo = MockIdentityRepository::new();
    let id = Uuid::new_v4();
    repo.insert(AuthIdentity::new(id)).await;

    assert!(repo.update_password_hash(id, "$2b$hash", Utc::now()).await.unwrap());
    assert_eq!(
        repo.get(id).await.unwrap().password_hash.as_deref(),
        Some("$2b$hash")
    );
    assert!(!repo
        .update_password_hash(Uuid::new_v4(), "$2b$hash", Utc::now())
        .await
        .unwrap());
}

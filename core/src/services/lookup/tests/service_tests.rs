//! Unit tests for customer lookup

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Customer;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{AuthError, DomainError};
use crate::repositories::MockCustomerRepository;
use crate::services::lookup::LookupService;

fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::parse(raw).unwrap()
}

#[tokio::test]
async fn test_resolve_single_customer() {
    let repo = Arc::new(MockCustomerRepository::new());
    let customer = Customer::new(&phone("3331234567")).with_email("anna@example.com");
    repo.insert(customer.clone()).await;
    let lookup = LookupService::new(repo);

    let found = lookup.resolve(&phone("+393331234567")).await.unwrap();
    assert_eq!(found.id, customer.id);
}

#[tokio::test]
async fn test_resolve_missing_customer() {
    let lookup = LookupService::new(Arc::new(MockCustomerRepository::new()));
    assert!(matches!(
        lookup.resolve(&phone("3331234567")).await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_resolve_ambiguous_customer() {
    let repo = Arc::new(MockCustomerRepository::new());
    repo.insert(Customer::new(&phone("3331234567"))).await;
    let mut legacy = Customer::new(&phone("3331234567"));
    legacy.phone_number = "3331234567".to_string();
    repo.insert(legacy).await;
    let lookup = LookupService::new(repo);

    assert!(matches!(
        lookup.resolve(&phone("3331234567")).await,
        Err(DomainError::Auth(AuthError::AmbiguousCustomer { count: 2 }))
    ));
}

#[tokio::test]
async fn test_projections() {
    let repo = Arc::new(MockCustomerRepository::new());
    let auth_id = Uuid::new_v4();
    let customer = Customer::new(&phone("3331234567"))
        .with_auth_id(auth_id)
        .with_email("anna@example.com");
    repo.insert(customer.clone()).await;
    let lookup = LookupService::new(repo);

    let identity = lookup.resolve_identity(&phone("3331234567")).await.unwrap();
    assert_eq!(identity.id, customer.id);
    assert_eq!(identity.auth_id, Some(auth_id));

    let contact = lookup.resolve_contact(&phone("3331234567")).await.unwrap();
    assert_eq!(contact.email.as_deref(), Some("anna@example.com"));
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let repo = Arc::new(MockCustomerRepository::new());
    repo.set_failing(true).await;
    let lookup = LookupService::new(repo);

    assert!(matches!(
        lookup.resolve(&phone("3331234567")).await,
        Err(DomainError::Dependency { .. })
    ));
}

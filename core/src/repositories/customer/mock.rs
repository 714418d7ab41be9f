//! In-memory implementation of CustomerRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Customer;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{AuthError, DomainError};
use crate::repositories::identity::MockIdentityRepository;
use crate::repositories::otp::MockOtpRepository;

use super::trait_::CustomerRepository;

/// Mock customer repository for testing
///
/// When built with [`MockCustomerRepository::with_identities`], phone changes
/// are mirrored onto the linked identity with all-or-nothing semantics.
/// [`MockCustomerRepository::with_otps`] links the code store so a phone
/// change deletes its authorizing code in the same step.
#[derive(Clone, Default)]
pub struct MockCustomerRepository {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
    identities: Option<MockIdentityRepository>,
    otps: Option<MockOtpRepository>,
    fail: Arc<RwLock<bool>>,
}

impl MockCustomerRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository sharing identity state with `identities`
    pub fn with_identities(identities: MockIdentityRepository) -> Self {
        Self {
            identities: Some(identities),
            ..Self::default()
        }
    }

    /// Share code state with `otps`
    pub fn with_otps(mut self, otps: MockOtpRepository) -> Self {
        self.otps = Some(otps);
        self
    }

    /// Store a customer as-is, without uniqueness checks
    pub async fn insert(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id, customer);
    }

    /// Current state of a customer
    pub async fn get(&self, id: Uuid) -> Option<Customer> {
        self.customers.read().await.get(&id).cloned()
    }

    /// Make every subsequent call fail like an unreachable database
    pub async fn set_failing(&self, failing: bool) {
        *self.fail.write().await = failing;
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::database("customer store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for MockCustomerRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Vec<Customer>, DomainError> {
        self.check_available().await?;
        let customers = self.customers.read().await;
        let mut found: Vec<Customer> = customers
            .values()
            .filter(|c| phone.matches_stored(&c.phone_number))
            .cloned()
            .collect();
        found.sort_by_key(|c| c.created_at);
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.check_available().await?;
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.check_available().await?;
        let customers = self.customers.read().await;
        Ok(customers
            .values()
            .find(|c| c.auth_id == Some(auth_id))
            .cloned())
    }

    async fn mark_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available().await?;
        let mut customers = self.customers.write().await;
        match customers.get_mut(&id) {
            Some(customer) => {
                customer.verify(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn change_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        otp_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Customer, DomainError> {
        self.check_available().await?;
        let mut customers = self.customers.write().await;

        let auth_id = match customers.get(&id) {
            Some(customer) => customer.auth_id,
            None => return Err(AuthError::UserNotFound.into()),
        };
        if customers
            .values()
            .any(|c| c.id != id && phone.matches_stored(&c.phone_number))
        {
            return Err(AuthError::PhoneAlreadyInUse.into());
        }

        let redeemed = match &self.otps {
            Some(otps) => match otps.take(otp_id).await {
                Some(row) => Some((otps, row)),
                None => return Err(AuthError::InvalidOrExpiredCode.into()),
            },
            None => None,
        };

        // Identity next: a failure here leaves the customer untouched
        if let (Some(identities), Some(auth_id)) = (&self.identities, auth_id) {
            if let Err(e) = identities.set_phone(auth_id, phone, at).await {
                if let Some((otps, row)) = redeemed {
                    otps.insert_raw(row).await;
                }
                return Err(e);
            }
        }

        let customer = customers
            .get_mut(&id)
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;
        customer.change_phone(phone, at);
        Ok(customer.clone())
    }
}

//! Customer lookup by phone

use lp_shared::phone::mask_phone;
use std::sync::Arc;

use crate::domain::entities::{Customer, CustomerContact, CustomerIdentity};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::CustomerRepository;

/// Resolves a phone number to exactly one customer
pub struct LookupService<C: CustomerRepository> {
    customers: Arc<C>,
}

impl<C: CustomerRepository> LookupService<C> {
    pub fn new(customers: Arc<C>) -> Self {
        Self { customers }
    }

    /// The single customer stored under `phone`
    ///
    /// # Errors
    /// * `AuthError::UserNotFound` - No customer carries the phone
    /// * `AuthError::AmbiguousCustomer` - Several customers carry it
    pub async fn resolve(&self, phone: &PhoneNumber) -> DomainResult<Customer> {
        let mut matches = self.customers.find_by_phone(phone).await?;
        match matches.len() {
            0 => {
                tracing::info!(
                    phone = %mask_phone(phone.as_str()),
                    event = "customer_not_found",
                    "No customer for phone"
                );
                Err(AuthError::UserNotFound.into())
            }
            1 => Ok(matches.remove(0)),
            count => {
                tracing::warn!(
                    phone = %mask_phone(phone.as_str()),
                    count = count,
                    event = "customer_ambiguous",
                    "Several customers share one phone number"
                );
                Err(AuthError::AmbiguousCustomer { count }.into())
            }
        }
    }

    /// Identifier columns of the customer stored under `phone`
    pub async fn resolve_identity(&self, phone: &PhoneNumber) -> DomainResult<CustomerIdentity> {
        Ok(self.resolve(phone).await?.identity())
    }

    /// Contact columns of the customer stored under `phone`
    pub async fn resolve_contact(&self, phone: &PhoneNumber) -> DomainResult<CustomerContact> {
        Ok(self.resolve(phone).await?.contact())
    }
}

//! Customer repository trait defining the interface for customer persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Customer;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::DomainError;

/// Repository trait for Customer entity persistence operations
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Every customer stored under any variant of `phone`
    ///
    /// More than one row means the data violates the one-customer-per-phone
    /// rule; callers decide how to treat it.
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Vec<Customer>, DomainError>;

    /// Find a customer by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;

    /// Find the customer linked to an auth identity
    async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<Customer>, DomainError>;

    /// Set the verified flag
    ///
    /// # Returns
    /// * `Ok(true)` - Flag set
    /// * `Ok(false)` - No customer with this ID
    async fn mark_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Move a customer, and its linked auth identity, to a new phone number
    ///
    /// The one-time code `otp_id` that authorized the move is deleted in the
    /// same transaction as both writes: either the code is gone and both rows
    /// carry the new phone afterwards, or nothing changed.
    ///
    /// # Errors
    /// * `AuthError::UserNotFound` - No customer with this ID
    /// * `AuthError::PhoneAlreadyInUse` - The phone is stored on another customer
    /// * `AuthError::InvalidOrExpiredCode` - The code was already redeemed
    async fn change_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        otp_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Customer, DomainError>;
}

//! One-time code store interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::OtpCode;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::DomainError;

/// Persistence of one-time codes
///
/// Implementations must make `issue` atomic and fail closed: a `find` that
/// overlaps an `issue` waits for it and then sees only the new row, so a
/// superseded code never matches once its replacement is being written.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Replace every code stored for `phone` (any stored variant) with `otp`
    async fn issue(&self, phone: &PhoneNumber, otp: &OtpCode) -> Result<(), DomainError>;

    /// Find the newest row matching `code` under any variant of `phone`
    ///
    /// # Returns
    /// * `Ok(Some(OtpCode))` - A row matches, expired or not
    /// * `Ok(None)` - No row matches the pair
    async fn find(&self, phone: &PhoneNumber, code: &str) -> Result<Option<OtpCode>, DomainError>;

    /// Delete a row by identity
    ///
    /// Returns `false` when the row was already gone.
    async fn consume(&self, id: Uuid) -> Result<bool, DomainError>;
}

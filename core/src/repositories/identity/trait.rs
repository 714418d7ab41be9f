//! Auth identity repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::AuthIdentity;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::DomainError;

/// Persistence of authentication identities
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find an identity by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthIdentity>, DomainError>;

    /// Bind `phone` to the identity and mark it confirmed at `at`
    ///
    /// Returns `false` when no identity has this ID.
    async fn confirm_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Replace the password hash
    ///
    /// Returns `false` when no identity has this ID.
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}

//! In-memory implementation of IdentityRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::AuthIdentity;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::DomainError;

use super::trait_::IdentityRepository;

/// Failure switches for individual operations
#[derive(Debug, Clone, Copy, Default)]
struct Failures {
    confirm_phone: bool,
    phone_update: bool,
    password_update: bool,
}

/// Mock identity repository for testing
#[derive(Clone, Default)]
pub struct MockIdentityRepository {
    identities: Arc<RwLock<HashMap<Uuid, AuthIdentity>>>,
    failures: Arc<RwLock<Failures>>,
}

impl MockIdentityRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, identity: AuthIdentity) {
        self.identities.write().await.insert(identity.id, identity);
    }

    pub async fn get(&self, id: Uuid) -> Option<AuthIdentity> {
        self.identities.read().await.get(&id).cloned()
    }

    /// Make `confirm_phone` fail
    pub async fn fail_confirm_phone(&self, fail: bool) {
        self.failures.write().await.confirm_phone = fail;
    }

    /// Make the identity half of a phone change fail
    pub async fn fail_phone_update(&self, fail: bool) {
        self.failures.write().await.phone_update = fail;
    }

    /// Make `update_password_hash` fail
    pub async fn fail_password_update(&self, fail: bool) {
        self.failures.write().await.password_update = fail;
    }

    /// Identity half of a phone change, used by the customer mock
    pub(crate) async fn set_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.failures.read().await.phone_update {
            return Err(DomainError::database("identity phone update failed"));
        }
        if let Some(identity) = self.identities.write().await.get_mut(&id) {
            identity.phone = Some(phone.as_str().to_string());
            identity.phone_confirmed_at = Some(at);
            identity.updated_at = at;
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityRepository for MockIdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthIdentity>, DomainError> {
        Ok(self.identities.read().await.get(&id).cloned())
    }

    async fn confirm_phone(
        &self,
        id: Uuid,
        phone: &PhoneNumber,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        if self.failures.read().await.confirm_phone {
            return Err(DomainError::database("identity store unavailable"));
        }
        let mut identities = self.identities.write().await;
        match identities.get_mut(&id) {
            Some(identity) => {
                identity.phone = Some(phone.as_str().to_string());
                identity.phone_confirmed_at = Some(at);
                identity.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        if self.failures.read().await.password_update {
            return Err(DomainError::database("identity store unavailable"));
        }
        let mut identities = self.identities.write().await;
        match identities.get_mut(&id) {
            Some(identity) => {
                identity.password_hash = Some(password_hash.to_string());
                identity.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

//! In-memory implementation of OtpRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::OtpCode;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// Mock code store; a single lock makes `issue` atomic
#[derive(Clone, Default)]
pub struct MockOtpRepository {
    rows: Arc<RwLock<Vec<OtpCode>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as written by an older client, bypassing `issue`
    pub async fn insert_raw(&self, row: OtpCode) {
        self.rows.write().await.push(row);
    }

    /// Remove a row by identity, returning it
    pub async fn take(&self, id: Uuid) -> Option<OtpCode> {
        let mut rows = self.rows.write().await;
        let index = rows.iter().position(|r| r.id == id)?;
        Some(rows.remove(index))
    }

    /// Every stored row
    pub async fn rows(&self) -> Vec<OtpCode> {
        self.rows.read().await.clone()
    }

    /// Rows stored under any variant of `phone`
    pub async fn rows_for(&self, phone: &PhoneNumber) -> Vec<OtpCode> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|r| phone.matches_stored(&r.phone_number))
            .cloned()
            .collect()
    }

    /// Make every subsequent call fail like an unreachable database
    pub async fn set_failing(&self, failing: bool) {
        *self.fail.write().await = failing;
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::database("otp store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn issue(&self, phone: &PhoneNumber, otp: &OtpCode) -> Result<(), DomainError> {
        self.check_available().await?;
        let mut rows = self.rows.write().await;
        rows.retain(|r| !phone.matches_stored(&r.phone_number));
        rows.push(otp.clone());
        Ok(())
    }

    async fn find(&self, phone: &PhoneNumber, code: &str) -> Result<Option<OtpCode>, DomainError> {
        self.check_available().await?;
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|r| r.code == code && phone.matches_stored(&r.phone_number))
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_available().await?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}

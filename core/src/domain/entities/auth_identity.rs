//! Authentication identity backing a customer account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credentials and confirmation state of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Unique identifier, referenced by `Customer::auth_id`
    pub id: Uuid,

    /// Phone bound to the identity, canonical form
    pub phone: Option<String>,

    /// When the phone was last confirmed by a one-time code
    pub phone_confirmed_at: Option<DateTime<Utc>>,

    /// When the email was confirmed
    pub email_confirmed_at: Option<DateTime<Utc>>,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Timestamp when the identity was last updated
    pub updated_at: DateTime<Utc>,
}

impl AuthIdentity {
    /// Creates an identity without credentials
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            phone: None,
            phone_confirmed_at: None,
            email_confirmed_at: None,
            password_hash: None,
            updated_at: Utc::now(),
        }
    }

    /// Sets the bound phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn is_phone_confirmed(&self) -> bool {
        self.phone_confirmed_at.is_some()
    }
}

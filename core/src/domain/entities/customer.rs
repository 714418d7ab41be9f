//! Customer entity of the loyalty program.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PhoneNumber;

/// Customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: Uuid,

    /// Linked authentication identity, when the customer has an account
    pub auth_id: Option<Uuid>,

    /// Contact email
    pub email: Option<String>,

    /// Canonical phone number
    pub phone_number: String,

    /// Phone ownership has been proven at least once
    pub is_verified: bool,

    /// Timestamp when the customer was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the customer was last updated
    pub updated_at: DateTime<Utc>,
}

/// Identifier columns of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    pub id: Uuid,
    pub auth_id: Option<Uuid>,
}

/// Contact columns of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub email: Option<String>,
}

impl Customer {
    /// Creates an unverified customer for a phone
    pub fn new(phone: &PhoneNumber) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            auth_id: None,
            email: None,
            phone_number: phone.as_str().to_string(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Links an authentication identity
    pub fn with_auth_id(mut self, auth_id: Uuid) -> Self {
        self.auth_id = Some(auth_id);
        self
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Marks the phone as proven
    pub fn verify(&mut self, at: DateTime<Utc>) {
        self.is_verified = true;
        self.updated_at = at;
    }

    /// Replaces the phone number
    pub fn change_phone(&mut self, phone: &PhoneNumber, at: DateTime<Utc>) {
        self.phone_number = phone.as_str().to_string();
        self.updated_at = at;
    }

    pub fn identity(&self) -> CustomerIdentity {
        CustomerIdentity {
            id: self.id,
            auth_id: self.auth_id,
        }
    }

    pub fn contact(&self) -> CustomerContact {
        CustomerContact {
            email: self.email.clone(),
        }
    }
}

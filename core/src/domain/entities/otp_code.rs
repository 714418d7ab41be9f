//! One-time code entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PhoneNumber;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for verification codes (10 minutes)
pub const DEFAULT_VALIDITY_MINUTES: i64 = 10;

/// A stored one-time code
///
/// At most one row per phone is effective: issuing a new code removes every
/// earlier row for the same phone. Rows are deleted when consumed and are
/// otherwise left in place after expiry until the next issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Row identity
    pub id: Uuid,

    /// Canonical phone number the code was sent to
    pub phone_number: String,

    /// Zero-padded 6-digit code
    pub code: String,

    /// Issue timestamp
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// Creates a new code row for a phone
    pub fn new(phone: &PhoneNumber, code: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: phone.as_str().to_string(),
            code: code.into(),
            created_at,
        }
    }

    /// The instant after which the code no longer verifies
    pub fn expires_at(&self, validity: Duration) -> DateTime<Utc> {
        self.created_at + validity
    }

    /// Checks expiry: a code is expired strictly after `created_at + validity`
    pub fn is_expired_at(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        now > self.expires_at(validity)
    }
}

/// Exactly six ASCII digits
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

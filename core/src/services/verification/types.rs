//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::OtpCode;

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The stored code row
    pub otp: OtpCode,
    /// The SMS message ID from the provider
    pub message_id: String,
    /// When the code stops verifying
    pub expires_at: DateTime<Utc>,
}

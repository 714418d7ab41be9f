//! One-time code configuration

use serde::{Deserialize, Serialize};

/// One-time code and phone canonicalization settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Minutes a code stays valid after issuance
    pub validity_minutes: i64,

    /// Country calling code assumed for numbers entered without one (digits only)
    pub default_country_code: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            validity_minutes: 10,
            default_country_code: String::from("39"),
        }
    }
}

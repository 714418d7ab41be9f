//! Configuration for the verification service

use lp_shared::OtpConfig;

use crate::domain::entities::DEFAULT_VALIDITY_MINUTES;
use crate::domain::value_objects::DEFAULT_COUNTRY_CODE;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes a code stays valid
    pub code_validity_minutes: i64,
    /// Country code assumed for bare national numbers
    pub default_country_code: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_validity_minutes: config.validity_minutes,
            default_country_code: config.default_country_code.clone(),
        }
    }
}

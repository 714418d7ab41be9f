//! Configuration for the authentication service

use lp_shared::{AuthConfig, PasswordPolicy};

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Password policy applied on reset
    pub password: PasswordPolicy,
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            password: config.password.clone(),
        }
    }
}

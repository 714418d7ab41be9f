//! Signed token and credential configuration

use serde::{Deserialize, Serialize};

/// Secret shipped for local development only
const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Signed token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Shared secret used to sign reset and session tokens
    pub secret: String,

    /// Token issuer claim
    pub issuer: String,

    /// Password reset token lifetime in seconds
    pub reset_token_expiry: i64,

    /// Session token lifetime in seconds
    pub session_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            issuer: String::from("loyalty-platform"),
            reset_token_expiry: 300,    // 5 minutes
            session_token_expiry: 3600, // 1 hour
        }
    }
}

impl JwtConfig {
    /// Create a new token configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session token expiry in minutes
    pub fn with_session_expiry_minutes(mut self, minutes: i64) -> Self {
        self.session_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Password policy applied when completing a reset
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum password length in characters
    pub min_length: usize,

    /// Maximum password length in characters
    pub max_length: usize,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            bcrypt_cost: 12,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Signed token configuration
    pub jwt: JwtConfig,

    /// Password policy
    pub password: PasswordPolicy,
}

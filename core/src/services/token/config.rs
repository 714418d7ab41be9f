//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use lp_shared::JwtConfig;

use crate::domain::entities::{JWT_ISSUER, RESET_TOKEN_EXPIRY_MINUTES, SESSION_TOKEN_EXPIRY_MINUTES};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Signing secret
    pub jwt_secret: String,
    /// Signing algorithm
    pub algorithm: Algorithm,
    /// Issuer claim written and required
    pub issuer: String,
    /// Password reset token lifetime
    pub reset_token_ttl: Duration,
    /// Session token lifetime
    pub session_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            reset_token_ttl: Duration::minutes(RESET_TOKEN_EXPIRY_MINUTES),
            session_token_ttl: Duration::minutes(SESSION_TOKEN_EXPIRY_MINUTES),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
            reset_token_ttl: Duration::seconds(config.reset_token_expiry),
            session_token_ttl: Duration::seconds(config.session_token_expiry),
        }
    }
}

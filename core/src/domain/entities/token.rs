//! Signed token entities for password reset and sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Password reset token lifetime (5 minutes)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 5;

/// Session token lifetime (60 minutes)
pub const SESSION_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Default issuer claim
pub const JWT_ISSUER: &str = "loyalty-platform";

/// What a token may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Completes a password reset after a verified one-time code
    PasswordReset,
    /// Identifies an authenticated caller
    Session,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::PasswordReset => "password_reset",
            TokenPurpose::Session => "session",
        }
    }
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for the token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (auth identity ID)
    pub sub: String,

    /// Operation the token is bound to
    pub purpose: TokenPurpose,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims issued at `now` and valid for `ttl`
    pub fn new(
        user_id: Uuid,
        purpose: TokenPurpose,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            purpose,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A freshly minted token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Encoded token
    pub token: String,

    /// Expiration time
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_window() {
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let claims = Claims::new(
            user_id,
            TokenPurpose::PasswordReset,
            JWT_ISSUER,
            now,
            Duration::minutes(RESET_TOKEN_EXPIRY_MINUTES),
        );

        assert_eq!(claims.exp - claims.iat, 300);
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.iss, "loyalty-platform");
    }

    #[test]
    fn test_purpose_serializes_snake_case() {
        let json = serde_json::to_string(&TokenPurpose::PasswordReset).unwrap();
        assert_eq!(json, "\"password_reset\"");
        assert_eq!(TokenPurpose::Session.to_string(), "session");
    }

    #[test]
    fn test_unique_jti() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let a = Claims::new(id, TokenPurpose::Session, JWT_ISSUER, now, Duration::minutes(1));
        let b = Claims::new(id, TokenPurpose::Session, JWT_ISSUER, now, Duration::minutes(1));
        assert_ne!(a.jti, b.jti);
    }
}

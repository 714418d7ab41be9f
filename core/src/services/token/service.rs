//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::{Claims, IssuedToken, TokenPurpose};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service minting and verifying signed tokens
///
/// Tokens are never stored; validity is carried by the signature and the
/// embedded expiry.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mints a token for `user_id` bound to `purpose`, valid for `ttl`
    pub fn mint(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<IssuedToken, DomainError> {
        let now = Utc::now();
        let claims = Claims::new(user_id, purpose, self.config.issuer.clone(), now, ttl);
        let token = self.encode_jwt(&claims)?;

        tracing::debug!(
            user_id = %user_id,
            purpose = %purpose,
            jti = %claims.jti,
            event = "token_minted",
            "Minted signed token"
        );

        Ok(IssuedToken {
            token,
            expires_at: now + ttl,
        })
    }

    /// Mints a password reset token with the configured lifetime
    pub fn mint_reset_token(&self, user_id: Uuid) -> Result<IssuedToken, DomainError> {
        self.mint(user_id, TokenPurpose::PasswordReset, self.config.reset_token_ttl)
    }

    /// Mints a session token with the configured lifetime
    pub fn mint_session_token(&self, user_id: Uuid) -> Result<IssuedToken, DomainError> {
        self.mint(user_id, TokenPurpose::Session, self.config.session_token_ttl)
    }

    /// Verifies a token and its purpose, returning the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, validity window and purpose all check out
    /// * `Err(TokenError::TokenExpired)` - The token is past its expiry
    /// * `Err(TokenError::InvalidToken)` - Anything else, including a purpose mismatch
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidToken),
            })?;

        let claims = token_data.claims;
        if claims.purpose != expected {
            tracing::warn!(
                expected = %expected,
                actual = %claims.purpose,
                jti = %claims.jti,
                event = "token_purpose_mismatch",
                "Token presented for the wrong purpose"
            );
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        if claims.user_id().is_err() {
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        Ok(claims)
    }

    /// Encodes claims into a signed token
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

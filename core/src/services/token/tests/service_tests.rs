//! Unit tests for the token service

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::TokenPurpose;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::default())
}

#[test]
fn test_reset_token_round_trip() {
    let service = service();
    let user_id = Uuid::new_v4();

    let issued = service.mint_reset_token(user_id).unwrap();
    let claims = service
        .verify(&issued.token, TokenPurpose::PasswordReset)
        .unwrap();

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.purpose, TokenPurpose::PasswordReset);
    assert_eq!(claims.exp - claims.iat, 300);
}

#[test]
fn test_reset_token_rejected_for_other_purpose() {
    let service = service();
    let issued = service.mint_reset_token(Uuid::new_v4()).unwrap();

    let result = service.verify(&issued.token, TokenPurpose::Session);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_session_token_rejected_for_reset() {
    let service = service();
    let issued = service.mint_session_token(Uuid::new_v4()).unwrap();

    let result = service.verify(&issued.token, TokenPurpose::PasswordReset);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_expired_token() {
    let service = service();
    let issued = service
        .mint(Uuid::new_v4(), TokenPurpose::PasswordReset, Duration::seconds(-120))
        .unwrap();

    let result = service.verify(&issued.token, TokenPurpose::PasswordReset);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_foreign_secret_is_rejected() {
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let issued = other.mint_reset_token(Uuid::new_v4()).unwrap();

    let result = service().verify(&issued.token, TokenPurpose::PasswordReset);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_foreign_issuer_is_rejected() {
    let other = TokenService::new(TokenServiceConfig {
        issuer: "someone-else".to_string(),
        ..TokenServiceConfig::default()
    });
    let issued = other.mint_reset_token(Uuid::new_v4()).unwrap();

    assert!(service()
        .verify(&issued.token, TokenPurpose::PasswordReset)
        .is_err());
}

#[test]
fn test_garbage_token() {
    for token in ["", "not-a-token", "a.b.c"] {
        assert!(matches!(
            service().verify(token, TokenPurpose::Session),
            Err(DomainError::Token(TokenError::InvalidToken))
        ));
    }
}

#[test]
fn test_config_from_shared_jwt_config() {
    let shared = lp_shared::JwtConfig::new("s3cret").with_session_expiry_minutes(30);
    let config = TokenServiceConfig::from(&shared);
    assert_eq!(config.session_token_ttl, Duration::minutes(30));
    assert_eq!(config.reset_token_ttl, Duration::minutes(5));
    assert_eq!(config.jwt_secret, "s3cret");
}

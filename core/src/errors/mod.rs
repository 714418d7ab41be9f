//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    /// An external collaborator (database, SMS provider) failed
    #[error("Dependency failure in {service}: {message}")]
    Dependency { service: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Database failure
    pub fn database(message: impl Into<String>) -> Self {
        DomainError::Dependency {
            service: "database".to_string(),
            message: message.into(),
        }
    }

    /// SMS provider failure
    pub fn sms(message: impl Into<String>) -> Self {
        DomainError::Dependency {
            service: "sms".to_string(),
            message: message.into(),
        }
    }

    /// True for failures the client caused (4xx class)
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Dependency { .. } | DomainError::Internal { .. }
        ) && !matches!(self, DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

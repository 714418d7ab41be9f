//! Error types for verification, token and validation failures
//!
//! Display strings are for logs. User-facing copy is configured in the
//! presentation layer for i18n support.

use thiserror::Error;

/// Verification and account resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No stored code matches the phone and code pair
    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    /// The code matched but its validity window has elapsed
    #[error("Verification code expired")]
    CodeExpired,

    #[error("User not found")]
    UserNotFound,

    /// More than one customer is stored under the same phone number
    #[error("Phone number matches {count} customers")]
    AmbiguousCustomer { count: usize },

    #[error("Phone number already in use")]
    PhoneAlreadyInUse,
}

impl AuthError {
    /// Both flavors of a rejected code
    pub fn is_code_rejection(&self) -> bool {
        matches!(self, AuthError::InvalidOrExpiredCode | AuthError::CodeExpired)
    }
}

/// Signed token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    /// Bad signature, malformed token, foreign issuer or wrong purpose
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid phone number: {input}")]
    InvalidPhoneNumber { input: String },

    #[error("Invalid length: {field} (min: {min}, max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },
}

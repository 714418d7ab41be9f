//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message (localized)
    pub error: String,

    /// Stable machine-readable code, see [`error_codes`]
    pub code: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Machine-readable error codes
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_PHONE: &str = "INVALID_PHONE";
    pub const WEAK_PASSWORD: &str = "WEAK_PASSWORD";
    pub const INVALID_CODE: &str = "INVALID_CODE";
    pub const CODE_EXPIRED: &str = "CODE_EXPIRED";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const AMBIGUOUS_CUSTOMER: &str = "AMBIGUOUS_CUSTOMER";
    pub const PHONE_ALREADY_IN_USE: &str = "PHONE_ALREADY_IN_USE";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new(
            error_codes::INVALID_CODE,
            "Codice non valido o scaduto.",
        ))
        .unwrap();
        assert_eq!(body["error"], "Codice non valido o scaduto.");
        assert_eq!(body["code"], "INVALID_CODE");
        assert!(body["timestamp"].is_string());
    }
}

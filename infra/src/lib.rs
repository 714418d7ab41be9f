//! # Infrastructure Layer
//!
//! Concrete implementations of the loyalty platform's outbound ports:
//! MySQL persistence for one-time codes, customers and auth identities,
//! and SMS delivery through Twilio or a development mock.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `twilio-sms`: Enable Twilio SMS service (default)

use lp_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Sms(message) => DomainError::sms(message),
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::database(other.to_string()),
        }
    }
}

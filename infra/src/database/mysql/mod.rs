//! MySQL implementations of the core repository traits.

mod customer_repository_impl;
mod identity_repository_impl;
mod otp_repository_impl;

pub use customer_repository_impl::MySqlCustomerRepository;
pub use identity_repository_impl::MySqlIdentityRepository;
pub use otp_repository_impl::MySqlOtpRepository;

use lp_core::errors::DomainError;
use uuid::Uuid;

/// `?, ?, ?` for an `IN (...)` clause
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Log a query failure and turn it into a dependency error
pub(crate) fn query_failed(operation: &'static str, error: sqlx::Error) -> DomainError {
    tracing::error!(
        operation,
        error = %error,
        event = "db_query_failed",
        "Database query failed"
    );
    DomainError::database(format!("{}: {}", operation, error))
}

/// Column read failure
pub(crate) fn column_error(column: &'static str, error: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to get {}: {}", column, error))
}

/// Ids are stored as CHAR(36)
pub(crate) fn parse_uuid(column: &'static str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value)
        .map_err(|e| DomainError::database(format!("Invalid UUID in {}: {}", column, e)))
}

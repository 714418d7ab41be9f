//! Shared utilities and common types for the loyalty platform server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error response structures
//! - Language and response types
//! - Phone formatting helpers for logs and input cleanup

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, OtpConfig,
    PasswordPolicy, ServerConfig, SmsConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{Empty, HealthResponse, HealthStatus, Language, SuccessResponse};
pub use utils::phone;

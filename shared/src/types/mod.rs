//! Type definitions module
//!
//! - `language` - Languages supported for localized messages
//! - `response` - API success wrappers and health checks

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{Empty, HealthResponse, HealthStatus, SuccessResponse};

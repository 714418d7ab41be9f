pub mod error;
pub mod health;

pub use error::{error_response, handle_domain_error_with_lang, handle_validation_errors};
pub use health::{health_check, HealthCheck, HealthChecks};

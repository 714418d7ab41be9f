//! # Loyalty Platform Core
//!
//! Domain layer for phone verification and credential recovery: entities,
//! services, repository interfaces and error types. Persistence and SMS
//! delivery live behind traits implemented in the infrastructure crate.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

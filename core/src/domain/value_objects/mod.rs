//! Value objects representing immutable domain concepts.

pub mod phone_number;
pub mod verification_outcome;

// Re-export commonly used types
pub use phone_number::{PhoneNumber, DEFAULT_COUNTRY_CODE};
pub use verification_outcome::{SideEffect, VerificationOutcome};

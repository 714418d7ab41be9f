//! Result types of a successful identity verification.

use serde::Serialize;

use crate::domain::entities::Customer;

/// Outcome of a best-effort secondary write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SideEffect {
    /// The write went through
    Applied,
    /// Nothing to apply (e.g. no linked identity)
    Skipped,
    /// The write failed; the primary operation still succeeded
    Failed(String),
}

impl SideEffect {
    pub fn is_failed(&self) -> bool {
        matches!(self, SideEffect::Failed(_))
    }
}

/// Identity verification result
///
/// The customer's verified flag is authoritative. `identity_confirmation`
/// reports whether the linked auth identity was also marked confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub customer: Customer,
    pub identity_confirmation: SideEffect,
}

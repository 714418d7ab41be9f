//! Password policy and hashing

use lp_shared::PasswordPolicy;

use crate::errors::{DomainError, DomainResult, ValidationError};

const PASSWORD_FIELD: &str = "newPassword";

/// Check a new password against the policy
///
/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: PASSWORD_FIELD.to_string(),
        });
    }
    let length = password.chars().count();
    if length < policy.min_length || length > policy.max_length {
        return Err(ValidationError::InvalidLength {
            field: PASSWORD_FIELD.to_string(),
            min: policy.min_length,
            max: policy.max_length,
            actual: length,
        });
    }
    Ok(())
}

/// Hash a password with bcrypt
pub fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

//! Cryptographically secure code generation

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::CODE_LENGTH;

use super::traits::CodeGenerator;

/// Exclusive upper bound of generated codes
const CODE_SPACE: u32 = 1_000_000;

/// Draws codes uniformly from `000000..=999999` using the OS random source
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl SecureCodeGenerator {
    /// Generate a cryptographically secure 6-digit verification code
    ///
    /// `gen_range` uses rejection sampling, so every code is equally likely.
    pub fn generate_secure_code() -> String {
        let n = OsRng.gen_range(0..CODE_SPACE);
        format!("{:0width$}", n, width = CODE_LENGTH)
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        Self::generate_secure_code()
    }
}

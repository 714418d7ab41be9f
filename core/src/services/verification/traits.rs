//! Traits for SMS delivery and code generation

use async_trait::async_trait;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a verification code via SMS, returning the provider message ID
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Source of one-time codes
pub trait CodeGenerator: Send + Sync {
    /// A 6-digit, zero-padded numeric code
    fn generate(&self) -> String;
}

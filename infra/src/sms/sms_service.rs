//! Provider-neutral SMS interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Outbound SMS provider
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a message to an E.164 phone number
    ///
    /// Returns the provider's message id.
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Human-readable provider name for logs and health output
    fn provider_name(&self) -> &str;

    /// Whether the provider is currently expected to accept messages
    async fn is_available(&self) -> bool;
}

/// Whether `phone` is a valid number written in E.164 form
pub fn is_valid_phone_number(phone: &str) -> bool {
    if !phone.starts_with('+') || phone.len() > 16 {
        return false;
    }
    phonenumber::parse(None, phone)
        .map(|parsed| phonenumber::is_valid(&parsed))
        .unwrap_or(false)
}

//! SMS provider configuration

use serde::{Deserialize, Serialize};

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// SMS service provider ("twilio" or "mock")
    pub provider: String,

    /// Provider account identifier (Twilio Account SID)
    pub account_sid: String,

    /// Provider secret (Twilio Auth Token)
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,

    /// Message body; `{code}` is replaced with the one-time code
    pub message_template: String,

    /// Maximum delivery attempts
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled after each failure
    pub retry_delay_ms: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            message_template: String::from("Il tuo codice di verifica è: {code}"),
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl SmsConfig {
    /// Render the message for a code
    pub fn render_message(&self, code: &str) -> String {
        self.message_template.replace("{code}", code)
    }
}

//! Twilio SMS Service Implementation
//!
//! Production delivery through the Twilio Messages API, with exponential
//! backoff on transient failures. Recipients must already be in E.164 form;
//! numbers are canonicalized by the core before they reach this layer.

use async_trait::async_trait;
use lp_shared::phone::mask_phone;
use lp_shared::SmsConfig;
use phonenumber::Mode;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// Twilio's hard limit on message bodies
const MAX_MESSAGE_CHARS: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum delivery attempts
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TryFrom<&SmsConfig> for TwilioConfig {
    type Error = InfrastructureError;

    fn try_from(config: &SmsConfig) -> Result<Self, Self::Error> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio account SID and auth token are required".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "Twilio from number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
        })
    }
}

/// How a failed attempt should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    /// Rate limited or provider-side error
    Transient,
    /// Bad request; retrying cannot help
    Permanent,
}

/// Classify a provider error by its rendered message
fn classify_failure(message: &str) -> FailureKind {
    let message = message.to_ascii_lowercase();
    let transient = ["429", "rate", "500", "502", "503", "504", "timed out", "connect"];
    if transient.iter().any(|marker| message.contains(marker)) {
        FailureKind::Transient
    } else if message.contains("400") || message.contains("invalid") {
        FailureKind::Permanent
    } else {
        FailureKind::Transient
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            from = %mask_phone(&config.from_number),
            event = "twilio_ready",
            "Twilio SMS service initialized"
        );

        Ok(Self { client, config })
    }

    /// Validate an E.164 recipient and return its formatted form
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        if !phone.starts_with('+') {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +393331234567)".to_string(),
            ));
        }

        let parsed = phonenumber::parse(None, phone).map_err(|e| {
            InfrastructureError::Sms(format!("Invalid phone number format: {}", e))
        })?;
        if !phonenumber::is_valid(&parsed) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone(phone)
            )));
        }

        Ok(parsed.format().mode(Mode::E164).to_string())
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                attempt = attempts,
                max_attempts = self.config.max_retries,
                phone = %mask_phone(to),
                "Sending SMS via Twilio"
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);
            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        phone = %mask_phone(to),
                        sid = %response.sid,
                        event = "sms_sent",
                        "SMS sent"
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    error!(
                        attempt = attempts,
                        max_attempts = self.config.max_retries,
                        error = %error_msg,
                        event = "sms_attempt_failed",
                        "Twilio send failed"
                    );

                    if classify_failure(&error_msg) == FailureKind::Permanent {
                        return Err(InfrastructureError::Sms(format!("Invalid request: {}", error_msg)));
                    }
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            attempts, error_msg
                        )));
                    }

                    warn!(delay_ms = delay.as_millis() as u64, "Retrying SMS after backoff");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }

    async fn is_available(&self) -> bool {
        true
    }
}

//! SMS Service Module
//!
//! SMS delivery for one-time codes. A provider-neutral [`SmsService`] trait
//! is implemented by a development mock and by Twilio; [`SmsSenderAdapter`]
//! plugs any of them into the core verification service.

use std::sync::Arc;

use lp_shared::SmsConfig;

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use adapter::SmsSenderAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::{is_valid_phone_number, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// `sms.provider` selects the implementation: `"mock"` or `"twilio"`.
/// A provider that cannot be built is a startup error, never a silent
/// downgrade to the mock.
pub fn create_sms_service(config: &SmsConfig) -> Result<Arc<dyn SmsService>, InfrastructureError> {
    let service: Arc<dyn SmsService> = match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => Arc::new(TwilioSmsService::new(TwilioConfig::try_from(config)?)?),
        other => {
            return Err(InfrastructureError::Config(format!(
                "Unknown SMS provider '{}'",
                other
            )))
        }
    };

    tracing::info!(
        provider = service.provider_name(),
        event = "sms_provider_selected",
        "SMS service initialized"
    );
    Ok(service)
}

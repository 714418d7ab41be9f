//! Development SMS service that logs instead of sending

use async_trait::async_trait;
use lp_shared::phone::mask_phone;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

use super::sms_service::{is_valid_phone_number, SmsService};
use crate::InfrastructureError;

/// Mock SMS service
///
/// Records a count of accepted messages and writes the masked recipient to
/// the log. Failure can be simulated for tests of the failure path.
#[derive(Debug, Default)]
pub struct MockSmsService {
    message_count: AtomicUsize,
    simulate_failure: AtomicBool,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in the failing state
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn get_message_count(&self) -> usize {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_phone_number(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone(phone_number)
            )));
        }
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Sms("Simulated SMS failure".to_string()));
        }

        self.message_count.fetch_add(1, Ordering::SeqCst);
        let message_id = format!("mock_{}", Uuid::new_v4().simple());

        tracing::info!(
            phone = %mask_phone(phone_number),
            message_length = message.chars().count(),
            message_id = %message_id,
            event = "sms_mock_sent",
            "Mock SMS accepted"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}

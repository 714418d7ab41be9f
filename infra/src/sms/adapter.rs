//! Bridges an infrastructure SMS provider into the core `SmsSender` port

use async_trait::async_trait;
use lp_core::services::verification::SmsSender;
use lp_shared::SmsConfig;
use std::sync::Arc;

use super::sms_service::SmsService;

/// Renders the verification message and hands it to a provider
pub struct SmsSenderAdapter {
    inner: Arc<dyn SmsService>,
    config: SmsConfig,
}

impl SmsSenderAdapter {
    pub fn new(inner: Arc<dyn SmsService>, config: SmsConfig) -> Self {
        Self { inner, config }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &Arc<dyn SmsService> {
        &self.inner
    }
}

#[async_trait]
impl SmsSender for SmsSenderAdapter {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let message = self.config.render_message(code);
        self.inner
            .send_sms(phone, &message)
            .await
            .map_err(|e| e.to_string())
    }
}

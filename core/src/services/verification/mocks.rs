//! Test doubles for SMS delivery and code generation

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::generator::SecureCodeGenerator;
use super::traits::{CodeGenerator, SmsSender};

/// Mock SMS service recording the last code sent to each phone
#[derive(Clone, Default)]
pub struct MockSmsSender {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockSmsSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(should_fail)),
        }
    }

    pub fn set_failing(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Last code sent to a canonical phone
    pub fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(phone).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        if *self.should_fail.lock().unwrap() {
            return Err("SMS service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

/// Hands out queued codes, then falls back to secure random ones
#[derive(Default)]
pub struct QueuedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl QueuedCodeGenerator {
    pub fn new<I, T>(codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
        }
    }

    pub fn push(&self, code: impl Into<String>) {
        self.codes.lock().unwrap().push_back(code.into());
    }
}

impl CodeGenerator for QueuedCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(SecureCodeGenerator::generate_secure_code)
    }
}

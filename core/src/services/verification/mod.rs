//! Verification service module for SMS one-time codes
//!
//! This module provides the code workflow:
//! - Code generation from the OS random source
//! - Issue with invalidation of every earlier code for the phone
//! - SMS delivery through an injected sender
//! - Validation with a fixed validity window and explicit consumption

mod config;
mod generator;
mod service;
mod traits;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use generator::SecureCodeGenerator;
pub use service::VerificationService;
pub use traits::{CodeGenerator, SmsSender};
pub use types::SendCodeResult;

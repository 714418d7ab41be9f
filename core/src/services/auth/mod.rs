//! Phone verification and credential recovery flows
//!
//! This module composes code verification, customer lookup and signed tokens
//! into the user-facing operations:
//! - Sending a code to a phone
//! - Verifying a customer's phone
//! - Verifying a code for password reset and completing the reset
//! - Requesting and confirming a phone number change

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{hash_password, validate_password, verify_password};
pub use service::AuthService;

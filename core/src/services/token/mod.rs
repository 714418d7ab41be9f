//! Token service module for signed, purpose-bound tokens
//!
//! This module handles:
//! - Minting short-lived password reset tokens after code verification
//! - Minting and verifying session tokens for authenticated callers
//! - Rejecting tokens presented for a purpose they were not minted for

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;

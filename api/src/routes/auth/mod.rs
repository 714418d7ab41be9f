//! Authentication route handlers
//!
//! - Phone verification (sending and verifying codes)
//! - Password reset through a verified phone
//! - Phone number change for signed-in customers

pub mod phone;
pub mod reset;
pub mod send_code;
pub mod verify_code;

use lp_core::repositories::{CustomerRepository, IdentityRepository, OtpRepository};
use lp_core::services::auth::AuthService;
use lp_core::services::token::TokenService;
use lp_core::services::verification::SmsSender;
use std::sync::Arc;

/// Application state that holds shared services
pub struct AppState<O, S, C, I>
where
    O: OtpRepository,
    S: SmsSender,
    C: CustomerRepository,
    I: IdentityRepository,
{
    pub auth_service: Arc<AuthService<O, S, C, I>>,
    /// Verifies session tokens for the protected scope
    pub token_service: Arc<TokenService>,
}

impl<O, S, C, I> AppState<O, S, C, I>
where
    O: OtpRepository,
    S: SmsSender,
    C: CustomerRepository,
    I: IdentityRepository,
{
    pub fn new(
        auth_service: Arc<AuthService<O, S, C, I>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            auth_service,
            token_service,
        }
    }
}

//! Domain entities representing core business objects.

pub mod auth_identity;
pub mod customer;
pub mod otp_code;
pub mod token;

// Re-export commonly used types
pub use auth_identity::AuthIdentity;
pub use customer::{Customer, CustomerContact, CustomerIdentity};
pub use otp_code::{is_well_formed_code, OtpCode, CODE_LENGTH, DEFAULT_VALIDITY_MINUTES};
pub use token::{
    Claims, IssuedToken, TokenPurpose, JWT_ISSUER, RESET_TOKEN_EXPIRY_MINUTES,
    SESSION_TOKEN_EXPIRY_MINUTES,
};

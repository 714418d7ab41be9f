//! Business services containing domain logic and use cases.

pub mod auth;
pub mod lookup;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use lookup::LookupService;
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    CodeGenerator, SecureCodeGenerator, SendCodeResult, SmsSender, VerificationService,
    VerificationServiceConfig,
};

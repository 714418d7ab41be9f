//! Repository traits for persistence, with in-memory implementations for tests.

pub mod customer;
pub mod identity;
pub mod otp;

pub use customer::CustomerRepository;
pub use identity::IdentityRepository;
pub use otp::OtpRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use customer::MockCustomerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use identity::MockIdentityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use otp::MockOtpRepository;

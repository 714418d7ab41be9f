pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

#[cfg(any(test, feature = "test-utils"))]
mod mock;

#[cfg(test)]
mod tests;

pub use r#trait::IdentityRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockIdentityRepository;

//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management and the repository implementations backing
//! the core repository traits. Multi-step writes run in transactions.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCustomerRepository, MySqlIdentityRepository, MySqlOtpRepository};

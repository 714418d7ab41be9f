//! Resolution of phone numbers to customer records

mod service;

#[cfg(test)]
mod tests;

pub use service::LookupService;

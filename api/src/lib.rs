//! # Loyalty Platform API
//!
//! HTTP surface for phone verification and credential recovery. The binary
//! wires MySQL and SMS implementations into [`app::create_app`]; tests wire
//! the in-memory ones.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;

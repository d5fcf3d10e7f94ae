//! Infrastructure adapters. Implement outbound ports.
//!
//! In-memory store, mock auth, HTML page surface, entropy/clock, terminal UI. Map errors
//! to DomainError.

pub mod auth;
pub mod entropy;
pub mod store;
pub mod surface;
pub mod ui;

//! Auth adapters. Implement AuthPort.

pub mod mock_auth;

pub use mock_auth::MockAuthAdapter;

//! Cross-cutting helpers: configuration and markup utilities.

pub mod config;
pub mod html;

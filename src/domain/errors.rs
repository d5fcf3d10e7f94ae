//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Data store error: {0}")]
    DataStore(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Render surface error: {0}")]
    Surface(String),

    /// A required UI region or element is absent. The operation is aborted before any
    /// state mutation.
    #[error("Presentation target not found: {0}")]
    MissingTarget(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Startup load failed; the user is asked to reload. Never retried.
    #[error("Failed to load application data: {0}")]
    DataLoad(String),
}

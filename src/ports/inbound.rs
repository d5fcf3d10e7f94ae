//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: a front end drives the controller until the user quits.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    async fn run(&self) -> Result<(), DomainError>;
}

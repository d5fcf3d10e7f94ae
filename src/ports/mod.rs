//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod entropy;
pub mod inbound;
pub mod outbound;

pub use entropy::{Clock, EntropySource};
pub use inbound::InputPort;
pub use outbound::{AuthPort, CONTENT_REGION, DataStorePort, PageElements, RenderSurface};

//! Application use cases. Orchestrate domain logic via ports.

pub mod bindings;
pub mod controller;
pub mod data_loader;
pub mod session_service;
pub mod views;

pub use bindings::{Binding, BindingTable};
pub use controller::{AppController, AppEvent};
pub use data_loader::{Catalog, DataLoader};
pub use session_service::SessionService;

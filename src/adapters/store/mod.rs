//! Data store adapters. Implement DataStorePort.

pub mod memory_store;

pub use memory_store::{MemoryStore, StoreData};

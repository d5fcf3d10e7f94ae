//! Entropy and clock adapters. Implement the `ports::entropy` traits.

pub mod fixed;
pub mod system;

pub use fixed::{FixedClock, FixedEntropy};
pub use system::{SystemClock, SystemEntropy};

//! Randomness and wall-clock ports.
//!
//! The demo's stand-in behaviours (quiz grading, initial auth outcome, minted session ids)
//! draw from [`EntropySource`]; tests inject a fixed source.

use chrono::{DateTime, Utc};

pub trait EntropySource: Send + Sync {
    /// Uniform integer in `low..=high`.
    fn uniform(&self, low: u32, high: u32) -> u32;

    /// True with probability `p` (clamped to [0, 1]).
    fn chance(&self, p: f64) -> bool;

    /// `len` lowercase base-36 characters.
    fn token(&self, len: usize) -> String;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// `now()` as the RFC 3339 string stored in progress records.
    fn now_stamp(&self) -> String {
        self.now().to_rfc3339()
    }
}

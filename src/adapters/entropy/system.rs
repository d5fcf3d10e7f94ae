//! Implements EntropySource with a seedable PRNG and Clock with the system clock.

use crate::ports::{Clock, EntropySource};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Thread-safe PRNG. Seeded runs are reproducible.
pub struct SystemEntropy {
    rng: Mutex<StdRng>,
}

impl SystemEntropy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Default for SystemEntropy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl EntropySource for SystemEntropy {
    fn uniform(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.with_rng(|rng| rng.gen_range(low..=high))
    }

    fn chance(&self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.with_rng(|rng| rng.gen_bool(p))
    }

    fn token(&self, len: usize) -> String {
        self.with_rng(|rng| {
            (0..len)
                .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
                .collect()
        })
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

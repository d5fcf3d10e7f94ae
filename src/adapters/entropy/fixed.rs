//! Deterministic entropy and clock for tests and reproducible demos.

use crate::ports::{Clock, EntropySource};
use chrono::{DateTime, TimeZone, Utc};

/// Always answers the same: `uniform` returns `value` clamped into the requested range,
/// `chance` returns `outcome`, `token` repeats `token_char`.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pub value: u32,
    pub outcome: bool,
    pub token_char: char,
}

impl FixedEntropy {
    pub fn new(value: u32, outcome: bool) -> Self {
        Self {
            value,
            outcome,
            token_char: 'a',
        }
    }
}

impl EntropySource for FixedEntropy {
    fn uniform(&self, low: u32, high: u32) -> u32 {
        self.value.clamp(low, high.max(low))
    }

    fn chance(&self, _p: f64) -> bool {
        self.outcome
    }

    fn token(&self, len: usize) -> String {
        std::iter::repeat_n(self.token_char, len).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2025-03-15T12:00:00Z.
    pub fn demo() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

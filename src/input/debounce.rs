//! Time-based debounce filter
//!
//! Every raw transition (bounce glitches included) restarts the stability
//! window. The stable value only follows the raw value once the raw value has
//! been held for at least the debounce interval.

use super::{Clock, InputSampler};
use std::time::{Duration, Instant};

/// Per-channel debounce state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFilter {
    last_raw: bool,
    stable: bool,
    last_change: Instant,
    interval: Duration,
}

impl DebounceFilter {
    /// Seed the filter from the very first raw reading, so startup never
    /// produces a transition.
    pub fn new(initial_raw: bool, now: Instant, interval: Duration) -> Self {
        Self {
            last_raw: initial_raw,
            stable: initial_raw,
            last_change: now,
            interval,
        }
    }

    /// Seed the filter by sampling `sampler` once
    pub fn seeded(sampler: &impl InputSampler, clock: &impl Clock, interval: Duration) -> Self {
        Self::new(sampler.is_asserted(), clock.now(), interval)
    }

    /// Feed one raw observation and return the stable value
    pub fn observe(&mut self, raw: bool, now: Instant) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_change = now;
        }

        if now.saturating_duration_since(self.last_change) >= self.interval {
            self.stable = self.last_raw;
        }

        self.stable
    }

    /// Sample the input once and return the debounced value
    pub fn read_stable(&mut self, sampler: &impl InputSampler, clock: &impl Clock) -> bool {
        let raw = sampler.is_asserted();
        self.observe(raw, clock.now())
    }

    /// Current stable value without sampling
    pub fn stable(&self) -> bool {
        self.stable
    }
}

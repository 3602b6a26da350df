//! Physical input channels, raw sampling and debouncing

mod channel;
mod debounce;
mod gpio;

pub use channel::{Channel, PerChannel};
pub use debounce::DebounceFilter;
pub use gpio::{open_gpio, GpioSampler};

use std::time::Instant;

/// Instantaneous raw reading of one physical switch
pub trait InputSampler {
    /// True when the switch is closed (pull-up already normalized)
    fn is_asserted(&self) -> bool;
}

impl<S: InputSampler + ?Sized> InputSampler for &S {
    fn is_asserted(&self) -> bool {
        (**self).is_asserted()
    }
}

/// Source of monotonic time for debouncing
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-independent system clock backed by `Instant::now`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

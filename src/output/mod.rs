//! Output side of the pipeline: event vocabulary, change emission and the
//! uinput-backed virtual device

mod emitter;
mod layout;
mod uinput;

pub use emitter::{Emitter, Snapshot};
pub use layout::{Layout, HAT_MAX, HAT_MIN, HAT_X, HAT_Y};
pub use uinput::UinputDevice;

use crate::error::Result;
use evdev::{AbsoluteAxisType, Key};

/// One output event queued on the virtual device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    /// Key or button press state change
    Button { key: Key, pressed: bool },
    /// Absolute axis position
    Axis { axis: AbsoluteAxisType, value: i32 },
}

/// Destination for output events
///
/// Events passed to [`EventSink::inject`] are queued; nothing becomes visible
/// to the host until [`EventSink::flush`] commits the queue as one batch.
pub trait EventSink {
    /// Queue a single event
    fn inject(&mut self, event: OutputEvent) -> Result<()>;

    /// Commit all queued events followed by one synchronization marker
    fn flush(&mut self) -> Result<()>;

    /// Drop queued events without committing them
    fn discard(&mut self) {}
}

impl<K: EventSink + ?Sized> EventSink for &mut K {
    fn inject(&mut self, event: OutputEvent) -> Result<()> {
        (**self).inject(event)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn discard(&mut self) {
        (**self).discard()
    }
}

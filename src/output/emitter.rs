//! Edge-triggered emission of state changes
//!
//! Only fields that changed since the last committed batch are written, and
//! each non-empty batch is closed by exactly one flush.

use super::{EventSink, Layout, OutputEvent, HAT_MAX, HAT_MIN, HAT_X, HAT_Y};
use crate::direction::{DirectionState, HatState};
use crate::error::Result;
use crate::input::Channel;
use log::{debug, trace};

/// Everything the device reports for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub buttons: DirectionState,
    /// Present only when the layout carries a hat
    pub hat: Option<HatState>,
}

/// Writes the difference between the last committed snapshot and the current
/// one to an [`EventSink`]
#[derive(Debug, Clone)]
pub struct Emitter {
    layout: Layout,
    previous: Snapshot,
    batches: u64,
}

impl Emitter {
    /// Start from the state of a freshly registered device
    pub fn new(layout: Layout) -> Self {
        Self::with_previous(layout, layout.released())
    }

    pub fn with_previous(layout: Layout, previous: Snapshot) -> Self {
        Self {
            layout,
            previous,
            batches: 0,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Last snapshot that was actually flushed
    pub fn previous(&self) -> Snapshot {
        self.previous
    }

    /// Number of batches flushed so far
    pub fn batches(&self) -> u64 {
        self.batches
    }

    /// Events needed to move the device from the previous snapshot to
    /// `current`, in up, down, left, right, hat-x, hat-y order
    pub fn diff(&self, current: &Snapshot) -> Vec<OutputEvent> {
        let mut events = Vec::with_capacity(6);

        for channel in Channel::ALL {
            let pressed = current.buttons.pressed(channel);
            if pressed != self.previous.buttons.pressed(channel) {
                events.push(OutputEvent::Button {
                    key: self.layout.key(channel),
                    pressed,
                });
            }
        }

        if let Some(hat) = current.hat {
            let before = self.previous.hat.unwrap_or(HatState::NEUTRAL);
            if hat.x != before.x {
                events.push(axis_event(HAT_X, hat.x));
            }
            if hat.y != before.y {
                events.push(axis_event(HAT_Y, hat.y));
            }
        }

        events
    }

    /// Inject every changed field and flush once if anything changed
    ///
    /// Returns whether a batch was flushed. The previous snapshot is replaced
    /// only after the flush succeeds.
    pub fn emit<K: EventSink + ?Sized>(&mut self, current: Snapshot, sink: &mut K) -> Result<bool> {
        let events = self.diff(&current);
        if events.is_empty() {
            return Ok(false);
        }

        for event in &events {
            if let Err(e) = sink.inject(*event) {
                sink.discard();
                return Err(e);
            }
        }
        sink.flush()?;

        trace!("Flushed batch of {} event(s): {:?}", events.len(), events);
        debug!(
            "Device state: pressed {:?}, hat {:?}",
            current.buttons.pressed_channels().collect::<Vec<_>>(),
            current.hat
        );

        self.previous = current;
        self.batches += 1;
        Ok(true)
    }
}

fn axis_event(axis: evdev::AbsoluteAxisType, value: i32) -> OutputEvent {
    OutputEvent::Axis {
        axis,
        value: value.clamp(HAT_MIN, HAT_MAX),
    }
}

//! In-memory collaborators
//!
//! Stand-ins for the GPIO pins, the clock and the virtual device so the
//! whole pipeline can be driven tick by tick without hardware.

use crate::error::{Error, Result};
use crate::input::{Clock, InputSampler};
use crate::output::{EventSink, OutputEvent};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct SamplerState {
    level: bool,
    script: VecDeque<bool>,
}

/// A switch whose level is set by the test
///
/// Clones share the same underlying level, so a test can keep a handle while
/// the driver owns another. Scripted readings are consumed one per sample;
/// once the script runs out the sampler keeps returning the last level.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSampler {
    state: Rc<RefCell<SamplerState>>,
}

impl ScriptedSampler {
    pub fn new(level: bool) -> Self {
        let sampler = Self::default();
        sampler.set(level);
        sampler
    }

    /// Set the level returned from now on (clears any pending script)
    pub fn set(&self, level: bool) {
        let mut state = self.state.borrow_mut();
        state.script.clear();
        state.level = level;
    }

    /// Queue readings to return one per sample
    pub fn script(&self, readings: impl IntoIterator<Item = bool>) {
        self.state.borrow_mut().script.extend(readings);
    }
}

impl InputSampler for ScriptedSampler {
    fn is_asserted(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if let Some(next) = state.script.pop_front() {
            state.level = next;
        }
        state.level
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Event sink that records everything it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    injected: Vec<OutputEvent>,
    pending: Vec<OutputEvent>,
    batches: Vec<Vec<OutputEvent>>,
    flushes: usize,
    fail_flush: Option<Error>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event ever injected, committed or not
    pub fn events(&self) -> &[OutputEvent] {
        &self.injected
    }

    /// Successfully committed batches
    pub fn batches(&self) -> &[Vec<OutputEvent>] {
        &self.batches
    }

    /// Number of flush calls, failed ones included
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Make the next flush fail with `error`
    pub fn fail_next_flush(&mut self, error: Error) {
        self.fail_flush = Some(error);
    }

    pub fn clear(&mut self) {
        self.injected.clear();
        self.pending.clear();
        self.batches.clear();
        self.flushes = 0;
    }
}

impl EventSink for RecordingSink {
    fn inject(&mut self, event: OutputEvent) -> Result<()> {
        self.injected.push(event);
        self.pending.push(event);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        let batch = std::mem::take(&mut self.pending);
        if let Some(err) = self.fail_flush.take() {
            return Err(err);
        }
        self.batches.push(batch);
        Ok(())
    }

    fn discard(&mut self) {
        self.pending.clear();
    }
}

//! Polling driver: the tick loop tying sampler, filter, aggregator and
//! emitter together

use crate::direction::aggregate;
use crate::error::Result;
use crate::input::{Clock, DebounceFilter, InputSampler, PerChannel};
use crate::output::{Emitter, EventSink, Layout};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Lifecycle of the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Terminated,
}

/// Owns every per-channel component and threads state through each tick
pub struct PollingDriver<S, C> {
    samplers: PerChannel<S>,
    filters: PerChannel<DebounceFilter>,
    emitter: Emitter,
    clock: C,
    poll_interval: Duration,
    state: DriverState,
    ticks: u64,
}

impl<S: InputSampler, C: Clock> PollingDriver<S, C> {
    /// Seed one filter per channel from its first raw reading
    pub fn new(
        samplers: PerChannel<S>,
        clock: C,
        layout: Layout,
        poll_interval: Duration,
        debounce_interval: Duration,
    ) -> Self {
        let filters = samplers.map(|_, sampler| {
            DebounceFilter::seeded(sampler, &clock, debounce_interval)
        });

        Self {
            samplers,
            filters,
            emitter: Emitter::new(layout),
            clock,
            poll_interval,
            state: DriverState::Running,
            ticks: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Batches flushed to the sink so far
    pub fn batches(&self) -> u64 {
        self.emitter.batches()
    }

    /// Run one pass of the pipeline; returns whether a batch was flushed
    pub fn tick<K: EventSink + ?Sized>(&mut self, sink: &mut K) -> Result<bool> {
        self.ticks += 1;

        let mut stable = PerChannel::<bool>::default();
        for (channel, filter) in self.filters.iter_mut() {
            let before = filter.stable();
            let pressed = filter.read_stable(&self.samplers[channel], &self.clock);
            if pressed != before {
                debug!("{} {}", channel, if pressed { "pressed" } else { "released" });
            }
            stable[channel] = pressed;
        }

        let snapshot = self.emitter.layout().snapshot(aggregate(&stable));
        self.emitter.emit(snapshot, sink)
    }

    /// Tick until `running` is cleared, sleeping the polling interval
    /// between ticks
    ///
    /// Emission failures are retried on the next tick; a fatal error stops
    /// the loop and is returned.
    pub fn run<K: EventSink + ?Sized>(
        &mut self,
        sink: &mut K,
        running: &AtomicBool,
    ) -> Result<()> {
        info!(
            "Polling every {:?} as '{}'",
            self.poll_interval,
            self.emitter.layout().device_name()
        );

        while self.state == DriverState::Running {
            if !running.load(Ordering::SeqCst) {
                self.state = DriverState::Terminated;
                break;
            }

            match self.tick(sink) {
                Ok(_) => {}
                Err(e) if e.is_fatal() => {
                    error!("{}", e);
                    self.state = DriverState::Terminated;
                    return Err(e);
                }
                Err(e) => warn!("{}; retrying on next tick", e),
            }

            thread::sleep(self.poll_interval);
        }

        info!(
            "Stopped after {} ticks, {} batches flushed",
            self.ticks,
            self.batches()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::Channel;
    use crate::output::OutputEvent;
    use crate::sim::{ManualClock, RecordingSink, ScriptedSampler};
    use evdev::Key;
    use std::io;

    const POLL: Duration = Duration::from_millis(2);
    const DEBOUNCE: Duration = Duration::from_millis(10);

    struct Rig {
        pins: PerChannel<ScriptedSampler>,
        clock: ManualClock,
        driver: PollingDriver<ScriptedSampler, ManualClock>,
        sink: RecordingSink,
    }

    impl Rig {
        fn new(layout: Layout) -> Self {
            Self::build(layout, |_| false)
        }

        /// Rig whose `channel` switch is already closed when the driver starts
        fn pressed_at_startup(layout: Layout, channel: Channel) -> Self {
            Self::build(layout, |c| c == channel)
        }

        fn build(layout: Layout, closed: impl Fn(Channel) -> bool) -> Self {
            let pins = PerChannel::from_fn(|c| ScriptedSampler::new(closed(c)));
            let clock = ManualClock::new();
            let driver = PollingDriver::new(pins.clone(), clock.clone(), layout, POLL, DEBOUNCE);
            Self {
                pins,
                clock,
                driver,
                sink: RecordingSink::new(),
            }
        }

        fn step(&mut self) -> bool {
            self.clock.advance(POLL);
            self.driver.tick(&mut self.sink).unwrap()
        }

        fn steps(&mut self, n: usize) -> usize {
            (0..n).filter(|_| self.step()).count()
        }
    }

    #[test]
    fn idle_ticks_produce_no_traffic() {
        let mut rig = Rig::new(Layout::ArrowKeys);
        assert_eq!(rig.steps(50), 0);
        assert!(rig.sink.events().is_empty());
        assert_eq!(rig.sink.flush_count(), 0);
        assert_eq!(rig.driver.ticks(), 50);
    }

    #[test]
    fn held_press_flushes_once() {
        let mut rig = Rig::new(Layout::ArrowKeys);
        rig.pins[Channel::Up].set(true);

        assert_eq!(rig.steps(20), 1);
        assert_eq!(
            rig.sink.batches(),
            [vec![OutputEvent::Button {
                key: Key::KEY_UP,
                pressed: true
            }]]
        );
    }

    #[test]
    fn startup_press_is_reported_without_debounce_delay() {
        let pins = PerChannel::from_fn(|c| ScriptedSampler::new(c == Channel::Left));
        let clock = ManualClock::new();
        let mut driver =
            PollingDriver::new(pins.clone(), clock.clone(), Layout::ArrowKeys, POLL, DEBOUNCE);
        let mut sink = RecordingSink::new();

        // The filter is seeded pressed; the fresh device still needs to hear it once
        clock.advance(POLL);
        assert!(driver.tick(&mut sink).unwrap());
        assert_eq!(
            sink.events(),
            [OutputEvent::Button {
                key: Key::KEY_LEFT,
                pressed: true
            }]
        );

        for _ in 0..20 {
            clock.advance(POLL);
            assert!(!driver.tick(&mut sink).unwrap());
        }
    }

    #[test]
    fn emit_failure_is_retried_next_tick() {
        let mut rig = Rig::new(Layout::ArrowKeys);
        rig.pins[Channel::Down].set(true);
        // Raw change seen at 2ms; the next tick (12ms) crosses the threshold
        assert_eq!(rig.steps(5), 0);

        rig.sink
            .fail_next_flush(Error::Emit(io::Error::new(io::ErrorKind::Other, "busy")));
        rig.clock.advance(POLL);
        assert!(rig.driver.tick(&mut rig.sink).is_err());
        assert!(rig.sink.batches().is_empty());

        assert!(rig.step());
        assert_eq!(rig.sink.batches().len(), 1);
        assert_eq!(rig.driver.batches(), 1);
    }

    #[test]
    fn run_exits_when_flag_cleared() {
        let mut rig = Rig::new(Layout::Dpad);
        let running = AtomicBool::new(false);
        rig.driver.run(&mut rig.sink, &running).unwrap();
        assert_eq!(rig.driver.state(), DriverState::Terminated);
        assert_eq!(rig.driver.ticks(), 0);
    }

    #[test]
    fn run_stops_on_fatal_error() {
        let mut rig = Rig::pressed_at_startup(Layout::ArrowKeys, Channel::Up);
        rig.sink.fail_next_flush(Error::DeviceUnavailable(io::Error::new(
            io::ErrorKind::NotFound,
            "device removed",
        )));

        let running = AtomicBool::new(true);
        let err = rig.driver.run(&mut rig.sink, &running).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(rig.driver.state(), DriverState::Terminated);
        assert_eq!(rig.driver.ticks(), 1);
        assert!(rig.sink.batches().is_empty());
    }

    #[test]
    fn run_keeps_going_after_emit_error() {
        let mut rig = Rig::pressed_at_startup(Layout::ArrowKeys, Channel::Up);
        rig.sink
            .fail_next_flush(Error::Emit(io::Error::new(io::ErrorKind::Other, "busy")));

        let running = AtomicBool::new(true);
        let result = thread::scope(|scope| {
            scope.spawn(|| {
                thread::sleep(Duration::from_millis(50));
                running.store(false, Ordering::SeqCst);
            });
            rig.driver.run(&mut rig.sink, &running)
        });

        assert!(result.is_ok());
        assert_eq!(rig.driver.state(), DriverState::Terminated);
        assert_eq!(rig.sink.flush_count(), 2);
        assert_eq!(
            rig.sink.batches(),
            [vec![OutputEvent::Button {
                key: Key::KEY_UP,
                pressed: true
            }]]
        );
    }
}

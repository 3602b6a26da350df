//! Output vocabularies for the two device variants

use super::Snapshot;
use crate::direction::{derive_hat, DirectionState};
use crate::input::Channel;
use evdev::{AbsInfo, AbsoluteAxisType, AttributeSet, Key, UinputAbsSetup};

/// Horizontal hat axis
pub const HAT_X: AbsoluteAxisType = AbsoluteAxisType::ABS_HAT0X;
/// Vertical hat axis
pub const HAT_Y: AbsoluteAxisType = AbsoluteAxisType::ABS_HAT0Y;

pub const HAT_MIN: i32 = -1;
pub const HAT_MAX: i32 = 1;

/// Which event vocabulary the virtual device speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Keyboard arrow keys
    ArrowKeys,
    /// Gamepad d-pad buttons plus a two-axis hat
    Dpad,
}

impl Layout {
    /// Name the device registers under
    pub fn device_name(&self) -> &'static str {
        match self {
            Layout::ArrowKeys => "DDR GPIO Dance Pad (Keyboard)",
            Layout::Dpad => "DDR GPIO Dance Pad",
        }
    }

    /// Output code for a channel
    pub fn key(&self, channel: Channel) -> Key {
        match (self, channel) {
            (Layout::ArrowKeys, Channel::Up) => Key::KEY_UP,
            (Layout::ArrowKeys, Channel::Down) => Key::KEY_DOWN,
            (Layout::ArrowKeys, Channel::Left) => Key::KEY_LEFT,
            (Layout::ArrowKeys, Channel::Right) => Key::KEY_RIGHT,
            (Layout::Dpad, Channel::Up) => Key::BTN_DPAD_UP,
            (Layout::Dpad, Channel::Down) => Key::BTN_DPAD_DOWN,
            (Layout::Dpad, Channel::Left) => Key::BTN_DPAD_LEFT,
            (Layout::Dpad, Channel::Right) => Key::BTN_DPAD_RIGHT,
        }
    }

    pub fn has_hat(&self) -> bool {
        matches!(self, Layout::Dpad)
    }

    /// Key codes the device declares
    pub fn keys(&self) -> AttributeSet<Key> {
        let mut keys = AttributeSet::<Key>::new();
        for channel in Channel::ALL {
            keys.insert(self.key(channel));
        }
        keys
    }

    /// Absolute axes the device declares (empty for the keyboard variant)
    pub fn axes(&self) -> Vec<UinputAbsSetup> {
        if !self.has_hat() {
            return Vec::new();
        }
        // value, min, max, fuzz, flat, resolution
        let setup = |axis| UinputAbsSetup::new(axis, AbsInfo::new(0, HAT_MIN, HAT_MAX, 0, 0, 0));
        vec![setup(HAT_X), setup(HAT_Y)]
    }

    /// Full output state for one tick
    pub fn snapshot(&self, buttons: DirectionState) -> Snapshot {
        Snapshot {
            buttons,
            hat: self.has_hat().then(|| derive_hat(buttons)),
        }
    }

    /// State of a freshly registered device: nothing pressed, hat centered
    pub fn released(&self) -> Snapshot {
        self.snapshot(DirectionState::default())
    }
}

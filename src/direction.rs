//! Combined directional state and hat derivation

use crate::input::{Channel, PerChannel};

/// Stable snapshot of all four channels for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionState {
    pub fn pressed(&self, channel: Channel) -> bool {
        match channel {
            Channel::Up => self.up,
            Channel::Down => self.down,
            Channel::Left => self.left,
            Channel::Right => self.right,
        }
    }

    /// Channels currently pressed, in emission order
    pub fn pressed_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL.into_iter().filter(move |c| self.pressed(*c))
    }
}

/// Two-axis hat value, each axis in {-1, 0, 1}
///
/// Follows the Linux hat convention: negative x is left, negative y is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HatState {
    pub x: i32,
    pub y: i32,
}

impl HatState {
    pub const NEUTRAL: HatState = HatState { x: 0, y: 0 };
}

/// Structure four stable booleans into one snapshot
pub fn aggregate(stable: &PerChannel<bool>) -> DirectionState {
    DirectionState {
        up: stable[Channel::Up],
        down: stable[Channel::Down],
        left: stable[Channel::Left],
        right: stable[Channel::Right],
    }
}

/// Derive the hat from the four directions
///
/// Opposite presses on one axis cancel out to neutral.
pub fn derive_hat(state: DirectionState) -> HatState {
    HatState {
        x: axis(state.left, state.right),
        y: axis(state.up, state.down),
    }
}

fn axis(negative: bool, positive: bool) -> i32 {
    match (negative, positive) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(up: bool, down: bool, left: bool, right: bool) -> DirectionState {
        DirectionState {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn aggregate_copies_fields() {
        let stable = PerChannel::from_fn(|c| matches!(c, Channel::Up | Channel::Right));
        assert_eq!(aggregate(&stable), state(true, false, false, true));
    }

    #[test]
    fn single_directions_map_to_signed_axes() {
        assert_eq!(derive_hat(state(true, false, false, false)), HatState { x: 0, y: -1 });
        assert_eq!(derive_hat(state(false, true, false, false)), HatState { x: 0, y: 1 });
        assert_eq!(derive_hat(state(false, false, true, false)), HatState { x: -1, y: 0 });
        assert_eq!(derive_hat(state(false, false, false, true)), HatState { x: 1, y: 0 });
    }

    #[test]
    fn opposite_presses_cancel() {
        let hat = derive_hat(state(false, false, true, true));
        assert_eq!(hat.x, 0);

        let hat = derive_hat(state(true, true, false, false));
        assert_eq!(hat.y, 0);
    }

    #[test]
    fn derive_hat_is_total() {
        for bits in 0u8..16 {
            let s = state(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            let hat = derive_hat(s);
            assert!((-1..=1).contains(&hat.x));
            assert!((-1..=1).contains(&hat.y));
            if s.left == s.right {
                assert_eq!(hat.x, 0);
            }
            if s.up == s.down {
                assert_eq!(hat.y, 0);
            }
            assert_eq!(hat, derive_hat(s));
        }
    }

    #[test]
    fn diagonal_sets_both_axes() {
        assert_eq!(derive_hat(state(true, false, false, true)), HatState { x: 1, y: -1 });
    }

    #[test]
    fn pressed_channels_in_order() {
        let s = state(false, true, true, false);
        let pressed: Vec<Channel> = s.pressed_channels().collect();
        assert_eq!(pressed, [Channel::Down, Channel::Left]);
    }
}

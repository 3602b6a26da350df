//! Logical direction channels and a fixed-size map keyed by them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four directional inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Up,
    Down,
    Left,
    Right,
}

impl Channel {
    /// All channels, in emission order
    pub const ALL: [Channel; 4] = [Channel::Up, Channel::Down, Channel::Left, Channel::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Up => "up",
            Channel::Down => "down",
            Channel::Left => "left",
            Channel::Right => "right",
        }
    }

    fn index(self) -> usize {
        match self {
            Channel::Up => 0,
            Channel::Down => 1,
            Channel::Left => 2,
            Channel::Right => 3,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per channel, stored inline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerChannel<T> {
    values: [T; 4],
}

impl<T> PerChannel<T> {
    /// Build a map by evaluating `f` once per channel, in emission order
    pub fn from_fn(mut f: impl FnMut(Channel) -> T) -> Self {
        Self {
            values: Channel::ALL.map(&mut f),
        }
    }

    /// Fallible variant of [`PerChannel::from_fn`]; stops at the first error
    pub fn try_from_fn<E>(mut f: impl FnMut(Channel) -> Result<T, E>) -> Result<Self, E> {
        let [up, down, left, right] = Channel::ALL;
        Ok(Self {
            values: [f(up)?, f(down)?, f(left)?, f(right)?],
        })
    }

    pub fn map<U>(&self, mut f: impl FnMut(Channel, &T) -> U) -> PerChannel<U> {
        PerChannel::from_fn(|channel| f(channel, &self[channel]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> {
        Channel::ALL.into_iter().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Channel, &mut T)> {
        Channel::ALL.into_iter().zip(self.values.iter_mut())
    }
}

impl<T> Index<Channel> for PerChannel<T> {
    type Output = T;

    fn index(&self, channel: Channel) -> &T {
        &self.values[channel.index()]
    }
}

impl<T> IndexMut<Channel> for PerChannel<T> {
    fn index_mut(&mut self, channel: Channel) -> &mut T {
        &mut self.values[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_emission_order() {
        let names: Vec<&str> = Channel::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["up", "down", "left", "right"]);
    }

    #[test]
    fn per_channel_indexes_by_channel() {
        let mut map = PerChannel::from_fn(|c| c.name().len());
        assert_eq!(map[Channel::Up], 2);
        assert_eq!(map[Channel::Right], 5);

        map[Channel::Left] = 99;
        assert_eq!(map[Channel::Left], 99);
        assert_eq!(map[Channel::Down], 4);
    }

    #[test]
    fn try_from_fn_stops_at_first_error() {
        let mut visited = Vec::new();
        let result: Result<PerChannel<u8>, Channel> = PerChannel::try_from_fn(|c| {
            visited.push(c);
            if c == Channel::Left {
                Err(c)
            } else {
                Ok(0)
            }
        });
        assert_eq!(result, Err(Channel::Left));
        assert_eq!(visited, [Channel::Up, Channel::Down, Channel::Left]);
    }

    #[test]
    fn iter_pairs_channels_with_values() {
        let map = PerChannel::from_fn(|c| c == Channel::Down);
        let pressed: Vec<Channel> = map
            .iter()
            .filter(|(_, v)| **v)
            .map(|(c, _)| c)
            .collect();
        assert_eq!(pressed, [Channel::Down]);
    }

    #[test]
    fn channel_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            channel: Channel,
        }
        let w: Wrapper = toml::from_str("channel = \"left\"").expect("Failed to deserialize");
        assert_eq!(w.channel, Channel::Left);
    }
}

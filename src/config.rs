//! Startup configuration for the GPIO d-pad
//!
//! The shipped binaries run on [`Config::default`]: a fixed channel-to-pin
//! mapping, a 2 ms polling interval and a 10 ms debounce interval. The same
//! values can be parsed from TOML for library users and tests.
//!
//! ## Example
//!
//! ```
//! use gpio_dpad::Config;
//!
//! let config = Config::from_toml_str(
//!     r#"
//! [pins]
//! up = 5
//! down = 6
//! left = 13
//! right = 19
//!
//! [timing]
//! poll_interval_ms = 1
//! debounce_ms = 20
//! "#,
//! )
//! .unwrap();
//! assert_eq!(config.pins.left, 13);
//! ```

use crate::input::{Channel, PerChannel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Values parsed but cannot be used
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Channel to BCM pin mapping
    #[serde(default)]
    pub pins: PinConfig,
    /// Polling and debounce timing
    #[serde(default)]
    pub timing: TimingConfig,
}

/// BCM pin number per channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinConfig {
    pub up: u8,
    pub down: u8,
    pub left: u8,
    pub right: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            up: 17,
            down: 22,
            left: 27,
            right: 23,
        }
    }
}

/// Tick loop timing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    /// Sleep between ticks in milliseconds
    pub poll_interval_ms: u64,
    /// How long a raw level must hold before it is accepted, in milliseconds
    pub debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2,
            debounce_ms: 10,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject zero intervals and pins shared between channels
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.timing.debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "debounce_ms must be at least 1".to_string(),
            ));
        }

        let pins = self.pin_map();
        for (i, (a, pin_a)) in pins.iter().enumerate() {
            for (b, pin_b) in pins.iter().skip(i + 1) {
                if pin_a == pin_b {
                    return Err(ConfigError::Invalid(format!(
                        "'{}' and '{}' share GPIO {}",
                        a, b, pin_a
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn pin(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Up => self.pins.up,
            Channel::Down => self.pins.down,
            Channel::Left => self.pins.left,
            Channel::Right => self.pins.right,
        }
    }

    pub fn pin_map(&self) -> PerChannel<u8> {
        PerChannel::from_fn(|channel| self.pin(channel))
    }

    /// Get polling interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.poll_interval_ms)
    }

    /// Get debounce interval as Duration
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.timing.debounce_ms)
    }
}

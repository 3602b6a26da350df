//! DDR GPIO Dance Pad - debounced GPIO direction switches as a virtual HID device
//!
//! Four momentary switches are sampled every tick, debounced, folded into one
//! directional snapshot and written to a uinput device as edge-triggered
//! events, one synchronization marker per batch of changes.

pub mod app;
pub mod config;
pub mod direction;
pub mod driver;
pub mod error;
pub mod input;
pub mod output;
pub mod sim;

pub use config::Config;
pub use error::{Error, Result};

//! Error types shared across the pipeline
//!
//! Only two things can actually go wrong at runtime: a collaborator that
//! cannot be acquired at startup (fatal), and an IO failure while writing a
//! batch to the virtual device (logged, retried on the next tick). Bounce
//! noise and opposite presses are absorbed and never reach this type.

use crate::input::Channel;
use std::io;
use thiserror::Error;

/// Errors raised by the GPIO and virtual-device collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// The GPIO peripheral could not be opened
    #[error(
        "GPIO unavailable: {0}. Run on a Raspberry Pi and make sure /dev/gpiomem is accessible \
         (add the user to the 'gpio' group or run with sudo)"
    )]
    GpioUnavailable(#[source] rppal::gpio::Error),

    /// A single pin could not be claimed
    #[error("cannot claim GPIO {pin} for '{channel}': {source}. Is another process using it?")]
    PinUnavailable {
        channel: Channel,
        pin: u8,
        #[source]
        source: rppal::gpio::Error,
    },

    /// The uinput device could not be created
    #[error(
        "virtual input device unavailable: {0}. Load the uinput module (modprobe uinput) and \
         make sure /dev/uinput is writable"
    )]
    DeviceUnavailable(#[source] io::Error),

    /// Writing a batch to the virtual device failed
    #[error("failed to emit events: {0}")]
    Emit(#[source] io::Error),
}

impl Error {
    /// Whether this error means a collaborator is missing and the process
    /// cannot continue
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Emit(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

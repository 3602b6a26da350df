//! GPIO-backed input sampler for Raspberry Pi boards

use super::{Channel, InputSampler, PerChannel};
use crate::error::{Error, Result};
use rppal::gpio::{Gpio, InputPin};

/// One switch wired between a GPIO pin and ground
///
/// The pin is configured with the internal pull-up, so a closed switch reads
/// low.
#[derive(Debug)]
pub struct GpioSampler {
    pin: InputPin,
}

impl GpioSampler {
    /// Claim `pin` (BCM numbering) as a pulled-up input
    pub fn open(gpio: &Gpio, channel: Channel, pin: u8) -> Result<Self> {
        let pin = gpio
            .get(pin)
            .map_err(|source| Error::PinUnavailable {
                channel,
                pin,
                source,
            })?
            .into_input_pullup();
        Ok(Self { pin })
    }

    /// Claim one pin per channel
    pub fn open_all(gpio: &Gpio, pins: &PerChannel<u8>) -> Result<PerChannel<Self>> {
        PerChannel::try_from_fn(|channel| Self::open(gpio, channel, pins[channel]))
    }

    /// BCM pin number this sampler is bound to
    pub fn pin(&self) -> u8 {
        self.pin.pin()
    }
}

impl InputSampler for GpioSampler {
    fn is_asserted(&self) -> bool {
        self.pin.is_low()
    }
}

/// Open the GPIO peripheral
pub fn open_gpio() -> Result<Gpio> {
    Gpio::new().map_err(Error::GpioUnavailable)
}

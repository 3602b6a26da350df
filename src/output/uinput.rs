//! Virtual input device registered through Linux uinput

use super::{EventSink, Layout, OutputEvent};
use crate::error::{Error, Result};
use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{BusType, EventType, InputEvent, InputId};
use log::info;

/// pid.codes test vendor
const VENDOR_ID: u16 = 0x1209;
const PRODUCT_ID: u16 = 0x0d9a;
const VERSION: u16 = 0x0001;

/// Virtual HID device owned for the lifetime of the process
///
/// Events are queued by `inject` and written as one batch on `flush`; the
/// kernel sees a single SYN_REPORT per batch. Dropping the value closes the
/// uinput handle, which unregisters the device from the host.
pub struct UinputDevice {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
    name: &'static str,
}

impl UinputDevice {
    /// Register a device declaring exactly the codes `layout` uses
    pub fn create(layout: Layout) -> Result<Self> {
        let name = layout.device_name();

        let mut builder = VirtualDeviceBuilder::new()
            .map_err(Error::DeviceUnavailable)?
            .name(name)
            .input_id(InputId::new(BusType::BUS_USB, VENDOR_ID, PRODUCT_ID, VERSION))
            .with_keys(&layout.keys())
            .map_err(Error::DeviceUnavailable)?;

        for axis in layout.axes() {
            builder = builder
                .with_absolute_axis(&axis)
                .map_err(Error::DeviceUnavailable)?;
        }

        let device = builder.build().map_err(Error::DeviceUnavailable)?;
        info!("Registered virtual device '{}'", name);

        Ok(Self {
            device,
            pending: Vec::with_capacity(8),
            name,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl EventSink for UinputDevice {
    fn inject(&mut self, event: OutputEvent) -> Result<()> {
        self.pending.push(to_input_event(event));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let batch = std::mem::take(&mut self.pending);
        // emit() terminates the batch with SYN_REPORT
        self.device.emit(&batch).map_err(Error::Emit)
    }

    fn discard(&mut self) {
        self.pending.clear();
    }
}

impl Drop for UinputDevice {
    fn drop(&mut self) {
        info!("Releasing virtual device '{}'", self.name);
    }
}

fn to_input_event(event: OutputEvent) -> InputEvent {
    match event {
        OutputEvent::Button { key, pressed } => {
            InputEvent::new(EventType::KEY, key.code(), i32::from(pressed))
        }
        OutputEvent::Axis { axis, value } => InputEvent::new(EventType::ABSOLUTE, axis.0, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::HAT_Y;
    use evdev::Key;

    #[test]
    fn button_events_carry_press_state() {
        let ev = to_input_event(OutputEvent::Button {
            key: Key::KEY_UP,
            pressed: true,
        });
        assert_eq!(ev.event_type(), EventType::KEY);
        assert_eq!(ev.code(), Key::KEY_UP.code());
        assert_eq!(ev.value(), 1);

        let ev = to_input_event(OutputEvent::Button {
            key: Key::KEY_UP,
            pressed: false,
        });
        assert_eq!(ev.value(), 0);
    }

    #[test]
    fn axis_events_carry_signed_value() {
        let ev = to_input_event(OutputEvent::Axis {
            axis: HAT_Y,
            value: -1,
        });
        assert_eq!(ev.event_type(), EventType::ABSOLUTE);
        assert_eq!(ev.code(), HAT_Y.0);
        assert_eq!(ev.value(), -1);
    }

    #[test]
    fn create_reports_missing_uinput() {
        // Without /dev/uinput access this must fail with an actionable error
        match UinputDevice::create(Layout::ArrowKeys) {
            Ok(device) => assert_eq!(device.name(), "DDR GPIO Dance Pad (Keyboard)"),
            Err(e) => {
                assert!(e.is_fatal());
                assert!(e.to_string().contains("uinput"));
            }
        }
    }
}

//! DDR GPIO Dance Pad as a gamepad: d-pad buttons plus a two-axis hat switch.

use gpio_dpad::output::Layout;

fn main() -> anyhow::Result<()> {
    gpio_dpad::app::run(Layout::Dpad)
}

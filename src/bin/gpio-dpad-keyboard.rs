//! DDR GPIO Dance Pad as a virtual keyboard: the four switches become arrow keys.

use gpio_dpad::output::Layout;

fn main() -> anyhow::Result<()> {
    gpio_dpad::app::run(Layout::ArrowKeys)
}

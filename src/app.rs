//! Process wiring shared by both binaries

use crate::config::Config;
use crate::driver::PollingDriver;
use crate::input::{open_gpio, GpioSampler, MonotonicClock, PerChannel};
use crate::output::{Layout, UinputDevice};
use anyhow::{Context, Result};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Acquire the pins and the virtual device, poll until interrupted, then
/// release the device.
pub fn run(layout: Layout) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    config.validate().context("built-in configuration is invalid")?;

    let gpio = open_gpio()?;
    let samplers = GpioSampler::open_all(&gpio, &config.pin_map())?;
    let pins = samplers.map(|_, sampler| sampler.pin());

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("failed to install interrupt handler")?;
    }

    let mut device = UinputDevice::create(layout)?;
    for line in startup_banner(layout, &pins) {
        info!("{}", line);
    }

    let mut driver = PollingDriver::new(
        samplers,
        MonotonicClock,
        layout,
        config.poll_interval(),
        config.debounce_interval(),
    );
    driver.run(&mut device, &running)?;

    drop(device);
    println!("\n{} stopped. Goodbye.", layout.device_name());

    Ok(())
}

/// Lines announcing that the device is live, how it is wired and how to stop it
pub fn startup_banner(layout: Layout, pins: &PerChannel<u8>) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    lines.push(format!("Virtual device '{}' is ready", layout.device_name()));
    lines.push("GPIO map (BCM):".to_string());
    for (channel, pin) in pins.iter() {
        lines.push(format!("  {:<5} -> GPIO {}", channel.name(), pin));
    }
    lines.push("Press Ctrl+C to exit".to_string());
    lines
}

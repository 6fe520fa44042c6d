//! Knobwatch firmware entry point.
//!
//! Brings up the SSD1306 panel, the knob inputs and the buzzer, then runs
//! the shared [`App`] loop body on a fixed poll interval. Drawing and the
//! buzzer tone run in their own tasks so the poll cadence holds.

#![no_std]
#![no_main]

mod board;
mod buzzer;
mod display;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_time::{Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use knobwatch::config::KNOB_POLL_INTERVAL_MS;
use knobwatch::App;

use board::KnobInputs;
use display::Panel;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("knobwatch starting");

    let buzzer = Output::new(p.P0_29, Level::Low, OutputDrive::Standard);
    unwrap!(spawner.spawn(buzzer::buzzer_task(buzzer)));

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    match display::init(i2c).await {
        Ok(d) => unwrap!(spawner.spawn(display::display_task(d))),
        Err(e) => {
            warn!("Display init failed: {}", e);
            // No panel: beep once a second.
            loop {
                buzzer::beep();
                embassy_time::Timer::after_secs(1).await;
            }
        }
    }

    let mut panel = Panel::new();
    let mut pins = KnobInputs::new(p.P0_03.degrade(), p.P0_04.degrade(), p.P0_28.degrade());
    let mut app = App::default();
    app.start(Instant::now().as_millis(), &mut pins, &mut panel);

    let mut ticker = Ticker::every(Duration::from_millis(KNOB_POLL_INTERVAL_MS));
    loop {
        app.tick(Instant::now().as_millis(), &mut pins, &mut panel);
        ticker.next().await;
    }
}

//! Piezo buzzer driven as a GPIO square wave.
//!
//! [`beep`] may be called from anywhere; the tone itself is produced by
//! [`buzzer_task`] so the main loop never waits on it. A new beep while a
//! tone is still sounding restarts the tone.

use defmt::debug;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use knobwatch::config::{BUZZER_DURATION_MS, BUZZER_FREQUENCY_HZ};

static BEEP_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Request one feedback tone.
pub fn beep() {
    BEEP_SIGNAL.signal(());
}

async fn tone(pin: &mut Output<'static>) {
    let half_period_us = 500_000 / BUZZER_FREQUENCY_HZ as u64;
    let toggles = BUZZER_DURATION_MS * 1000 / half_period_us;
    for _ in 0..toggles {
        pin.toggle();
        Timer::after_micros(half_period_us).await;
    }
}

#[embassy_executor::task]
pub async fn buzzer_task(mut pin: Output<'static>) -> ! {
    loop {
        BEEP_SIGNAL.wait().await;
        loop {
            debug!("Buzzer: {=u32} Hz", BUZZER_FREQUENCY_HZ);
            match select(tone(&mut pin), BEEP_SIGNAL.wait()).await {
                Either::First(()) => break,
                Either::Second(()) => {}
            }
        }
        pin.set_low();
    }
}

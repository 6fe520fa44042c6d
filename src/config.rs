//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, knob tuning and UI bounds live here so they
//! can be tuned in one place.

use crate::ui::watch::ClockTime;

// Main loop

/// Period of the fixed-rate poll loop (ms). Must stay well below
/// `BUTTON_DEBOUNCE_MS` or key presses are dropped.
pub const KNOB_POLL_INTERVAL_MS: u64 = 5;

// Knob

/// Minimum time between two accepted key presses (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 200;

/// Quadrature transitions per mechanical detent.
/// 4 = full-cycle encoders (one click per A/B cycle), 2 = half-cycle.
pub const KNOB_TRANSITIONS_PER_DETENT: u8 = 4;

/// Swap Increment/Decrement if the encoder is wired A/B reversed.
pub const KNOB_DIRECTION_INVERTED: bool = false;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Logical names only; the concrete `embassy_nrf::peripherals::*` pins
// are taken in `main.rs`.  Adjust for your board.
//
//   Knob A (CLK)   → P0.03
//   Knob B (DT)    → P0.04
//   Knob key (SW)  → P0.28  (active-low, internal pull-up)
//   Buzzer         → P0.29
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

// Menu

/// Number of icons on the menu screen.
pub const TOTAL_MENU_ICONS: usize = 6;

// Brightness

pub const MIN_BRIGHTNESS: u8 = 0;
pub const MAX_BRIGHTNESS: u8 = 255;

/// Backlight change per knob detent on the brightness screen.
pub const BRIGHTNESS_STEP: u8 = 5;

/// Backlight level at power-on.
pub const DEFAULT_BRIGHTNESS: u8 = 255;

// Watch face

/// Placeholder wall-clock time shown at boot (no RTC on this board).
pub const INITIAL_CLOCK_TIME: ClockTime = ClockTime::new(10, 15, 30);

/// Time reserved for the first-load hand sweep before the second hand
/// starts ticking (ms).
pub const HAND_ANIMATION_WINDOW_MS: u64 = 1200;

/// Duration of each hand sweep on first load (ms).
pub const HAND_ANIMATION_DURATION_MS: u64 = 1000;

/// Start delays of the hour/minute/second sweeps (ms).
pub const HAND_ANIMATION_DELAYS_MS: [u64; 3] = [200, 100, 0];

/// Watch hand update period (ms).
pub const HAND_UPDATE_INTERVAL_MS: u64 = 1000;

// Buzzer

/// Key-press feedback tone frequency (Hz).
pub const BUZZER_FREQUENCY_HZ: u32 = 1000;

/// Key-press feedback tone length (ms).
pub const BUZZER_DURATION_MS: u64 = 100;

//! Knob-driven smartwatch firmware - host-testable core.
//!
//! This library holds everything that does not touch the nRF52840
//! peripherals directly:
//!
//! - `knob`: quadrature decoding and key debouncing
//! - `ui`: screen state machine, menu focus, brightness, watch clock
//! - `app`: the per-tick loop body tying them together
//!
//! Hardware sits behind two traits, [`knob::KnobPins`] for input and
//! [`ui::Frontend`] for output, so the whole loop runs on the host with
//! mock implementations.
//!
//! Usage: `cargo test` (host) or
//! `cargo run --release --features embedded --target thumbv7em-none-eabihf`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod error;
pub mod knob;
pub mod ui;

pub use app::{App, TickOutcome};
pub use error::Error;

//! Unified error type for knobwatch.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! The knob decoder and screen dispatcher never fail; these errors come
//! from constructing bounded values and from the device frontend.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A bounded index was built from a value outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },

    // Display
    /// I²C transaction to the panel failed.
    Display,

    /// The panel rejected a contrast (backlight) command.
    Backlight,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range 0..{}", index, len)
            }
            Error::Display => f.write_str("display transfer failed"),
            Error::Backlight => f.write_str("backlight command failed"),
        }
    }
}

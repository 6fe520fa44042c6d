//! Rotary knob input - quadrature decoding and key debouncing.
//!
//! The knob has two quadrature phases (A/B) and a push-button key.
//! Both are polled from the main loop at `KNOB_POLL_INTERVAL_MS`:
//!
//! - [`KnobDecoder`] turns raw phase changes into one logical tick per
//!   mechanical detent, delivered through a single-slot mailbox.
//! - [`KeyDebouncer`] turns the raw key level into at most one accepted
//!   press per debounce window.

pub mod button;
pub mod decoder;

pub use button::{KeyDebouncer, KeyRepeat};
pub use decoder::{KnobConfig, KnobDecoder};

/// Logical meaning of a decoded knob tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// No tick.
    #[default]
    None,
    /// Clockwise detent.
    Increment,
    /// Counter-clockwise detent.
    Decrement,
}

impl Direction {
    /// The opposite direction (`None` stays `None`).
    pub const fn reversed(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Increment => Direction::Decrement,
            Direction::Decrement => Direction::Increment,
        }
    }
}

/// Instantaneous level of the two encoder phases (`true` = high).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phases {
    pub a: bool,
    pub b: bool,
}

impl Phases {
    pub const fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// Two-bit Gray code `A<<1 | B`.
    pub const fn bits(self) -> u8 {
        ((self.a as u8) << 1) | (self.b as u8)
    }
}

/// Raw knob hardware, polled once per loop iteration.
///
/// Reads must not block. Pin faults are not reported at this layer;
/// a floating input simply decodes as noise.
pub trait KnobPins {
    /// Current A/B phase levels.
    fn read_phases(&mut self) -> Phases;

    /// `true` while the key is physically held (after active-low inversion).
    fn key_active(&mut self) -> bool;
}

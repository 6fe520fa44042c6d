//! Backlight level and its on-screen percentage.

use crate::config::{MAX_BRIGHTNESS, MIN_BRIGHTNESS};
use crate::knob::Direction;

/// Linear integer re-map of `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Truncates toward zero; a degenerate input range maps to `out_min`.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Backlight level, always in `[MIN_BRIGHTNESS, MAX_BRIGHTNESS]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: Self = Self(MIN_BRIGHTNESS);
    pub const MAX: Self = Self(MAX_BRIGHTNESS);

    pub const fn new(level: u8) -> Self {
        if level < MIN_BRIGHTNESS {
            Self::MIN
        } else if level > MAX_BRIGHTNESS {
            Self::MAX
        } else {
            Self(level)
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Move one knob tick of `step`, capped at the bounds.
    pub fn step(self, direction: Direction, step: u8) -> Self {
        match direction {
            Direction::Increment => Self::new(self.0.saturating_add(step).min(MAX_BRIGHTNESS)),
            Direction::Decrement => Self::new(self.0.saturating_sub(step).max(MIN_BRIGHTNESS)),
            Direction::None => self,
        }
    }

    /// Level re-mapped to 0-100 for the readout.
    pub fn percent(self) -> u8 {
        map_range(
            self.0 as i32,
            MIN_BRIGHTNESS as i32,
            MAX_BRIGHTNESS as i32,
            0,
            100,
        ) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_matches_integer_remap() {
        assert_eq!(map_range(0, 0, 255, 0, 100), 0);
        assert_eq!(map_range(255, 0, 255, 0, 100), 100);
        assert_eq!(map_range(205, 0, 255, 0, 100), 80);
        assert_eq!(map_range(128, 0, 255, 0, 100), 50);
        assert_eq!(map_range(7, 3, 3, 10, 20), 10);
    }

    #[test]
    fn ten_decrements_from_full() {
        let mut b = Brightness::MAX;
        for _ in 0..10 {
            b = b.step(Direction::Decrement, 5);
        }
        assert_eq!(b.level(), 205);
        assert_eq!(b.percent(), 80);
    }

    #[test]
    fn step_caps_instead_of_wrapping() {
        assert_eq!(Brightness::new(253).step(Direction::Increment, 5), Brightness::MAX);
        assert_eq!(Brightness::new(3).step(Direction::Decrement, 5), Brightness::MIN);
        assert_eq!(Brightness::MIN.step(Direction::Decrement, 5), Brightness::MIN);
    }
}

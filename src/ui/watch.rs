//! Watch face clock and hand scheduling.
//!
//! There is no RTC on the board, so the face shows a placeholder time
//! that advances once per second. The first time the face is shown in a
//! session the hands sweep in from 12 o'clock; the per-second update only
//! starts after that sweep window. Later visits place the hands directly.
//!
//! Timing is polled from the main loop (`WatchPhase` + deadlines) rather
//! than driven by timer callbacks.

use super::Frontend;
use crate::config::{HAND_ANIMATION_WINDOW_MS, HAND_UPDATE_INTERVAL_MS, INITIAL_CLOCK_TIME};

/// 12-hour wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockTime {
    /// Out-of-range fields are reduced modulo their period.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 12,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// One second later. Fields are reduced into range first.
    pub fn advance(&mut self) {
        let second = self.second % 60 + 1;
        let minute = self.minute % 60 + second / 60;
        self.second = second % 60;
        self.minute = minute % 60;
        self.hour = (self.hour % 12 + minute / 60) % 12;
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }
}

/// Hand angles in tenths of a degree, clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandAngles {
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl HandAngles {
    pub const fn from_time(t: ClockTime) -> Self {
        let hour_deg = (t.hour % 12) as u16 * 30 + t.minute as u16 / 2;
        Self {
            hour: hour_deg * 10,
            minute: t.minute as u16 * 60,
            second: t.second as u16 * 60,
        }
    }
}

/// Hand update scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchPhase {
    /// Face never shown yet.
    Stopped,
    /// First-load sweep in progress; the clock is held.
    Animating { until_ms: u64 },
    /// Clock advancing once per `HAND_UPDATE_INTERVAL_MS`.
    Running { next_tick_ms: u64 },
}

pub struct WatchFace {
    time: ClockTime,
    phase: WatchPhase,
    first_load: bool,
}

impl WatchFace {
    pub const fn new(time: ClockTime) -> Self {
        Self {
            time: ClockTime::new(time.hour, time.minute, time.second),
            phase: WatchPhase::Stopped,
            first_load: true,
        }
    }

    /// Called each time the watch screen becomes visible.
    pub fn enter<F: Frontend>(&mut self, now_ms: u64, frontend: &mut F) {
        let angles = HandAngles::from_time(self.time);
        if self.first_load {
            self.first_load = false;
            frontend.animate_hands(angles);
            self.phase = WatchPhase::Animating {
                until_ms: now_ms.saturating_add(HAND_ANIMATION_WINDOW_MS),
            };
            debug!("Watch: first load, sweeping hands");
        } else {
            frontend.set_hands(angles);
        }
    }

    /// Advance the schedule. Hands are only pushed while `visible`; the
    /// clock keeps running on other screens.
    pub fn tick<F: Frontend>(&mut self, now_ms: u64, visible: bool, frontend: &mut F) {
        match self.phase {
            WatchPhase::Stopped => {}
            WatchPhase::Animating { until_ms } => {
                if now_ms >= until_ms {
                    debug!("Watch: sweep done, clock running");
                    self.step_clock(until_ms, visible, frontend);
                }
            }
            WatchPhase::Running { next_tick_ms } => {
                // One second per loop pass; a stalled loop catches up gradually.
                if now_ms >= next_tick_ms {
                    self.step_clock(next_tick_ms, visible, frontend);
                }
            }
        }
    }

    fn step_clock<F: Frontend>(&mut self, due_ms: u64, visible: bool, frontend: &mut F) {
        self.time.advance();
        self.phase = WatchPhase::Running {
            next_tick_ms: due_ms.saturating_add(HAND_UPDATE_INTERVAL_MS),
        };
        if visible {
            frontend.set_hands(HandAngles::from_time(self.time));
        }
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn phase(&self) -> WatchPhase {
        self.phase
    }

    /// `true` until the face has been shown once.
    pub fn is_first_load(&self) -> bool {
        self.first_load
    }
}

impl Default for WatchFace {
    fn default() -> Self {
        Self::new(INITIAL_CLOCK_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_for_placeholder_time() {
        let a = HandAngles::from_time(ClockTime::new(10, 15, 30));
        assert_eq!(a.hour, (10 * 30 + 7) * 10);
        assert_eq!(a.minute, 900);
        assert_eq!(a.second, 1800);
    }

    #[test]
    fn noon_is_zero() {
        assert_eq!(
            HandAngles::from_time(ClockTime::new(12, 0, 0)),
            HandAngles::default()
        );
    }

    #[test]
    fn advance_rolls_over_minute_and_hour() {
        let mut t = ClockTime::new(11, 59, 59);
        t.advance();
        assert_eq!(t, ClockTime::new(0, 0, 0));

        let mut t = ClockTime::new(3, 7, 59);
        t.advance();
        assert_eq!(t, ClockTime::new(3, 8, 0));
    }

    #[test]
    fn advance_from_raw_fields_stays_in_range() {
        let mut t = ClockTime {
            hour: 3,
            minute: 10,
            second: 255,
        };
        t.advance();
        assert_eq!(t, ClockTime::new(3, 10, 16));

        let mut t = ClockTime {
            hour: 200,
            minute: 119,
            second: 59,
        };
        t.advance();
        assert_eq!(t, ClockTime::new(9, 0, 0));
    }

    #[test]
    fn face_normalises_its_start_time() {
        let face = WatchFace::new(ClockTime {
            hour: 13,
            minute: 0,
            second: 250,
        });
        assert_eq!(face.time(), ClockTime::new(1, 0, 10));
    }

    #[test]
    fn new_reduces_out_of_range_fields() {
        assert_eq!(ClockTime::new(13, 61, 60), ClockTime::new(1, 1, 0));
    }
}

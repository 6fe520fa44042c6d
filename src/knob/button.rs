//! Knob key debouncing.
//!
//! The key is polled from the main loop rather than interrupt-driven.
//! A press is accepted only when the key reads active and at least
//! `BUTTON_DEBOUNCE_MS` have passed since the last accepted press, so
//! contact bounce inside the window is suppressed. The poll cadence must
//! stay well below the window; a slow loop misses presses instead of
//! double-counting them.

use crate::config::BUTTON_DEBOUNCE_MS;

/// What a key held past the debounce window does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyRepeat {
    /// Level-triggered: a held key fires again once per window.
    #[default]
    AutoRepeat,
    /// Edge-latched: the key must be seen released (outside the bounce
    /// window) before the next press is accepted.
    RequireRelease,
}

/// Debounce state for the knob key.
pub struct KeyDebouncer {
    window_ms: u64,
    repeat: KeyRepeat,
    last_accepted_ms: Option<u64>,
    /// Only used by `RequireRelease`.
    armed: bool,
}

impl KeyDebouncer {
    pub const fn new() -> Self {
        Self::with_window(BUTTON_DEBOUNCE_MS, KeyRepeat::AutoRepeat)
    }

    pub const fn with_window(window_ms: u64, repeat: KeyRepeat) -> Self {
        Self {
            window_ms,
            repeat,
            last_accepted_ms: None,
            armed: true,
        }
    }

    /// Returns `true` exactly once per accepted press.
    pub fn poll(&mut self, active: bool, now_ms: u64) -> bool {
        let window_open = match self.last_accepted_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.window_ms,
            None => true,
        };

        if !active {
            // A release seen inside the window may just be bounce.
            if window_open {
                self.armed = true;
            }
            return false;
        }

        if !window_open {
            return false;
        }
        if self.repeat == KeyRepeat::RequireRelease && !self.armed {
            return false;
        }

        self.last_accepted_ms = Some(now_ms);
        self.armed = false;
        true
    }

    /// Timestamp of the last accepted press.
    pub fn last_press_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }

    pub fn repeat(&self) -> KeyRepeat {
        self.repeat
    }
}

impl Default for KeyDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_is_accepted() {
        let mut key = KeyDebouncer::new();
        assert!(key.poll(true, 0));
        assert_eq!(key.last_press_ms(), Some(0));
    }

    #[test]
    fn inactive_key_never_fires() {
        let mut key = KeyDebouncer::new();
        for t in (0..1000).step_by(5) {
            assert!(!key.poll(false, t));
        }
    }

    #[test]
    fn second_read_inside_window_is_suppressed() {
        let mut key = KeyDebouncer::new();
        assert!(key.poll(true, 1000));
        assert!(!key.poll(true, 1100));
        assert!(!key.poll(true, 1199));
    }

    #[test]
    fn held_key_repeats_once_per_window() {
        let mut key = KeyDebouncer::new();
        let fired: usize = (0..=1000)
            .step_by(5)
            .filter(|&t| key.poll(true, t))
            .count();
        // t = 0, 200, 400, 600, 800, 1000
        assert_eq!(fired, 6);
    }

    #[test]
    fn window_counts_from_last_accepted_press() {
        let mut key = KeyDebouncer::new();
        assert!(key.poll(true, 0));
        assert!(!key.poll(true, 150));
        // 200 ms after the accepted press, not after the rejected read.
        assert!(key.poll(true, 200));
    }

    #[test]
    fn require_release_ignores_held_key() {
        let mut key = KeyDebouncer::with_window(200, KeyRepeat::RequireRelease);
        assert!(key.poll(true, 0));
        assert!(!key.poll(true, 400));
        assert!(!key.poll(false, 410));
        assert!(key.poll(true, 420));
    }

    #[test]
    fn require_release_ignores_bounce_release() {
        let mut key = KeyDebouncer::with_window(200, KeyRepeat::RequireRelease);
        assert!(key.poll(true, 0));
        // Contact bounce inside the window does not re-arm.
        assert!(!key.poll(false, 10));
        assert!(!key.poll(true, 20));
        assert!(!key.poll(true, 250));
    }
}

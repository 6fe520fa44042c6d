//! Quadrature decoder producing one tick per detent.
//!
//! Phase changes are looked up in a Gray-code transition table and
//! accumulated until a full detent has been travelled. The resulting
//! direction is parked in a single-slot mailbox: the flag stays raised
//! until [`KnobDecoder::take_event`] consumes it, and a newer tick
//! overwrites an unconsumed one.
//!
//! Noise degrades to "no event": an illegal jump (both phases changed
//! between two polls) and a partial detent abandoned at the rest
//! position are both dropped.

use super::{Direction, Phases};
use crate::config::{KNOB_DIRECTION_INVERTED, KNOB_TRANSITIONS_PER_DETENT};

/// Step for index `(prev << 2) | curr`.
///
/// `+1` follows `00 → 10 → 11 → 01 → 00` (A leads B).
/// Illegal double-phase jumps map to 0 and are caught separately.
const TRANSITIONS: [i8; 16] = [
    // prev=00: 00, 01, 10, 11
    0, -1, 1, 0, //
    // prev=01: 00, 01, 10, 11
    1, 0, 0, -1, //
    // prev=10: 00, 01, 10, 11
    -1, 0, 0, 1, //
    // prev=11: 00, 01, 10, 11
    0, 1, -1, 0,
];

/// Decoder tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobConfig {
    /// Quadrature transitions per detent: 1, 2 or 4.
    transitions_per_detent: u8,
    /// Swap Increment/Decrement.
    inverted: bool,
}

/// Round a transition count down to 1, 2 or 4.
const fn supported_detent(transitions: u8) -> u8 {
    match transitions {
        0 | 1 => 1,
        2 | 3 => 2,
        _ => 4,
    }
}

impl KnobConfig {
    pub const fn new() -> Self {
        Self {
            transitions_per_detent: supported_detent(KNOB_TRANSITIONS_PER_DETENT),
            inverted: KNOB_DIRECTION_INVERTED,
        }
    }

    /// Unsupported counts round down to the nearest of 1, 2 or 4.
    pub const fn with_transitions_per_detent(mut self, transitions: u8) -> Self {
        self.transitions_per_detent = supported_detent(transitions);
        self
    }

    pub const fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub const fn transitions_per_detent(&self) -> u8 {
        self.transitions_per_detent
    }

    pub const fn inverted(&self) -> bool {
        self.inverted
    }
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotary encoder state.
pub struct KnobDecoder {
    config: KnobConfig,
    /// Net raw transitions since `initialize`.
    raw_position: i32,
    /// Transitions travelled towards the next detent.
    partial: i8,
    last_bits: u8,
    /// Phase pattern of the detent the knob sat in at `initialize`.
    rest_bits: u8,
    trigger: bool,
    direction: Direction,
    last_scan_ms: Option<u64>,
    cycle_time_ms: u64,
    glitches: u32,
}

impl KnobDecoder {
    pub const fn new(config: KnobConfig) -> Self {
        Self {
            config: config.with_transitions_per_detent(config.transitions_per_detent),
            raw_position: 0,
            partial: 0,
            last_bits: 0b11,
            rest_bits: 0b11,
            trigger: false,
            direction: Direction::None,
            last_scan_ms: None,
            cycle_time_ms: 0,
            glitches: 0,
        }
    }

    /// Reset all counters and latch the current phases as the rest detent.
    pub fn initialize(&mut self, now_ms: u64, phases: Phases) {
        let bits = phases.bits();
        self.raw_position = 0;
        self.partial = 0;
        self.last_bits = bits;
        self.rest_bits = bits;
        self.trigger = false;
        self.direction = Direction::None;
        self.last_scan_ms = Some(now_ms);
        self.cycle_time_ms = 0;
        self.glitches = 0;
        debug!("Knob: init phases={=u8:#b}", bits);
    }

    /// Feed one poll of the encoder phases.
    ///
    /// Raises the trigger flag when a detent boundary is crossed; never
    /// clears it.
    pub fn scan_tick(&mut self, now_ms: u64, phases: Phases) {
        if let Some(last) = self.last_scan_ms {
            self.cycle_time_ms = now_ms.saturating_sub(last);
        }
        self.last_scan_ms = Some(now_ms);

        let curr = phases.bits();
        let prev = self.last_bits;
        if curr == prev {
            return;
        }
        self.last_bits = curr;

        if prev ^ curr == 0b11 {
            // Both phases moved between polls: direction unknown.
            self.glitches = self.glitches.saturating_add(1);
            self.partial = 0;
            warn!("Knob: glitch {=u8:#b} -> {=u8:#b}", prev, curr);
            return;
        }

        let step = TRANSITIONS[((prev << 2) | curr) as usize];
        self.raw_position = self.raw_position.saturating_add(step as i32);
        self.partial += step;

        let per_detent = self.config.transitions_per_detent as i8;
        if self.partial >= per_detent {
            self.partial = 0;
            self.raise(Direction::Increment);
        } else if self.partial <= -per_detent {
            self.partial = 0;
            self.raise(Direction::Decrement);
        } else if self.is_rest(curr) {
            self.partial = 0;
        }
    }

    fn raise(&mut self, direction: Direction) {
        let direction = if self.config.inverted {
            direction.reversed()
        } else {
            direction
        };
        if self.trigger {
            trace!("Knob: overwriting unconsumed {}", self.direction);
        }
        self.direction = direction;
        self.trigger = true;
    }

    fn is_rest(&self, bits: u8) -> bool {
        match self.config.transitions_per_detent {
            4 => bits == self.rest_bits,
            2 => bits == self.rest_bits || bits == self.rest_bits ^ 0b11,
            _ => true,
        }
    }

    /// Consume the pending tick, clearing the trigger flag.
    pub fn take_event(&mut self) -> Option<Direction> {
        if !self.trigger {
            return None;
        }
        self.trigger = false;
        Some(self.direction)
    }

    /// Pending tick without consuming it.
    pub fn peek(&self) -> Option<Direction> {
        self.trigger.then_some(self.direction)
    }

    pub fn is_triggered(&self) -> bool {
        self.trigger
    }

    pub fn raw_position(&self) -> i32 {
        self.raw_position
    }

    /// Interval between the last two scans (ms), for diagnostics.
    pub fn cycle_time_ms(&self) -> u64 {
        self.cycle_time_ms
    }

    /// Illegal transitions seen since `initialize`.
    pub fn glitch_count(&self) -> u32 {
        self.glitches
    }

    pub fn config(&self) -> KnobConfig {
        self.config
    }
}

impl Default for KnobDecoder {
    fn default() -> Self {
        Self::new(KnobConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    fn at_rest() -> KnobDecoder {
        let mut knob = KnobDecoder::default();
        knob.initialize(0, Phases::new(true, true));
        knob
    }

    fn feed(knob: &mut KnobDecoder, t: &mut u64, seq: &[(bool, bool)]) {
        for &(a, b) in seq {
            *t += 5;
            knob.scan_tick(*t, Phases::new(a, b));
        }
    }

    #[test]
    fn initialize_clears_state() {
        let knob = at_rest();
        assert_eq!(knob.raw_position(), 0);
        assert!(!knob.is_triggered());
        assert_eq!(knob.peek(), None);
    }

    #[test]
    fn one_clockwise_detent_is_one_increment() {
        let mut knob = at_rest();
        let mut t = 0;
        feed(&mut knob, &mut t, &CW[..3]);
        assert!(!knob.is_triggered());
        feed(&mut knob, &mut t, &CW[3..]);
        assert_eq!(knob.raw_position(), 4);
        assert_eq!(knob.take_event(), Some(Direction::Increment));
        assert_eq!(knob.take_event(), None);
    }

    #[test]
    fn one_counter_clockwise_detent_is_one_decrement() {
        let mut knob = at_rest();
        let mut t = 0;
        feed(&mut knob, &mut t, &CCW);
        assert_eq!(knob.raw_position(), -4);
        assert_eq!(knob.take_event(), Some(Direction::Decrement));
    }

    #[test]
    fn flag_survives_until_consumed() {
        let mut knob = at_rest();
        let mut t = 0;
        feed(&mut knob, &mut t, &CW);
        // Idle scans never clear the flag.
        knob.scan_tick(100, Phases::new(true, true));
        knob.scan_tick(105, Phases::new(true, true));
        assert_eq!(knob.peek(), Some(Direction::Increment));
        assert_eq!(knob.take_event(), Some(Direction::Increment));
        assert!(!knob.is_triggered());
    }

    #[test]
    fn newer_tick_overwrites_unconsumed_one() {
        let mut knob = at_rest();
        let mut t = 0;
        feed(&mut knob, &mut t, &CW);
        feed(&mut knob, &mut t, &CCW);
        assert_eq!(knob.take_event(), Some(Direction::Decrement));
        assert_eq!(knob.take_event(), None);
    }

    #[test]
    fn contact_bounce_within_detent_is_ignored() {
        let mut knob = at_rest();
        let mut t = 0;
        feed(
            &mut knob,
            &mut t,
            &[(false, true), (true, true), (false, true), (true, true)],
        );
        assert!(!knob.is_triggered());
        assert_eq!(knob.raw_position(), 0);
    }

    #[test]
    fn double_phase_jump_counts_as_glitch() {
        let mut knob = at_rest();
        let mut t = 0;
        feed(&mut knob, &mut t, &[(false, true), (true, false)]);
        assert_eq!(knob.glitch_count(), 1);
        assert!(!knob.is_triggered());
        assert_eq!(knob.raw_position(), 1);
    }

    #[test]
    fn glitch_residue_is_dropped_at_rest() {
        let mut knob = at_rest();
        let mut t = 0;
        // 11 -> 01 -> (jump) 10 -> 11 leaves one stray transition.
        feed(&mut knob, &mut t, &[(false, true), (true, false), (true, true)]);
        assert!(!knob.is_triggered());

        // The next detent still needs all four transitions.
        feed(&mut knob, &mut t, &CW[..3]);
        assert!(!knob.is_triggered());
        feed(&mut knob, &mut t, &CW[3..]);
        assert_eq!(knob.take_event(), Some(Direction::Increment));
    }

    #[test]
    fn rest_detent_is_learned_at_initialize() {
        let mut knob = KnobDecoder::default();
        knob.initialize(0, Phases::new(false, false));
        let mut t = 0;
        feed(
            &mut knob,
            &mut t,
            &[(true, false), (true, true), (false, true), (false, false)],
        );
        assert_eq!(knob.take_event(), Some(Direction::Increment));
    }

    #[test]
    fn inverted_config_swaps_direction() {
        let mut knob = KnobDecoder::new(KnobConfig::new().with_inverted(true));
        knob.initialize(0, Phases::new(true, true));
        let mut t = 0;
        feed(&mut knob, &mut t, &CW);
        assert_eq!(knob.take_event(), Some(Direction::Decrement));
    }

    #[test]
    fn half_cycle_encoder_ticks_every_two_transitions() {
        let mut knob = KnobDecoder::new(KnobConfig::new().with_transitions_per_detent(2));
        knob.initialize(0, Phases::new(true, true));
        let mut t = 0;
        feed(&mut knob, &mut t, &CW[..2]);
        assert_eq!(knob.take_event(), Some(Direction::Increment));
        feed(&mut knob, &mut t, &CW[2..]);
        assert_eq!(knob.take_event(), Some(Direction::Increment));
    }

    #[test]
    fn unsupported_detent_size_rounds_down() {
        assert_eq!(KnobConfig::new().with_transitions_per_detent(0).transitions_per_detent(), 1);
        assert_eq!(KnobConfig::new().with_transitions_per_detent(3).transitions_per_detent(), 2);
        assert_eq!(KnobConfig::new().with_transitions_per_detent(9).transitions_per_detent(), 4);
    }

    #[test]
    fn decoder_normalises_raw_config() {
        let mut knob = KnobDecoder::new(KnobConfig {
            transitions_per_detent: 3,
            inverted: false,
        });
        assert_eq!(knob.config().transitions_per_detent(), 2);
        knob.initialize(0, Phases::new(true, true));
        let mut t = 0;
        feed(&mut knob, &mut t, &CW[..2]);
        assert_eq!(knob.take_event(), Some(Direction::Increment));
        feed(&mut knob, &mut t, &CW[2..]);
        assert_eq!(knob.take_event(), Some(Direction::Increment));

        // 200 would overflow the i8 partial count.
        let mut knob = KnobDecoder::new(KnobConfig {
            transitions_per_detent: 200,
            inverted: false,
        });
        knob.initialize(0, Phases::new(true, true));
        let mut t = 0;
        for (i, &(a, b)) in CCW.iter().enumerate() {
            t += 5;
            knob.scan_tick(t, Phases::new(a, b));
            if i < 3 {
                assert!(!knob.is_triggered());
            }
        }
        assert_eq!(knob.take_event(), Some(Direction::Decrement));
    }

    #[test]
    fn cycle_time_tracks_scan_interval() {
        let mut knob = at_rest();
        knob.scan_tick(5, Phases::new(true, true));
        knob.scan_tick(12, Phases::new(true, true));
        assert_eq!(knob.cycle_time_ms(), 7);
    }
}

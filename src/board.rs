//! GPIO wiring of the knob.
//!
//! Both encoder phases and the push key are active-low with the internal
//! pull-up enabled. The pins are sampled by the main loop every
//! [`KNOB_POLL_INTERVAL_MS`](knobwatch::config::KNOB_POLL_INTERVAL_MS)
//! instead of waiting on edges, so bounce is handled by the decoder and
//! the debouncer rather than by timers here.

use embassy_nrf::gpio::{AnyPin, Input, Pull};
use knobwatch::knob::{KnobPins, Phases};

pub struct KnobInputs {
    phase_a: Input<'static>,
    phase_b: Input<'static>,
    key: Input<'static>,
}

impl KnobInputs {
    pub fn new(phase_a: AnyPin, phase_b: AnyPin, key: AnyPin) -> Self {
        Self {
            phase_a: Input::new(phase_a, Pull::Up),
            phase_b: Input::new(phase_b, Pull::Up),
            key: Input::new(key, Pull::Up),
        }
    }
}

impl KnobPins for KnobInputs {
    fn read_phases(&mut self) -> Phases {
        Phases::new(self.phase_a.is_high(), self.phase_b.is_high())
    }

    fn key_active(&mut self) -> bool {
        self.key.is_low()
    }
}

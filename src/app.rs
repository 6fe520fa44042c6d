//! One pass of the main loop.
//!
//! `App` bundles the knob decoder, the key debouncer and the screen
//! dispatcher so the device binary and host tests run exactly the same
//! sequence each tick:
//!
//! 1. scan the encoder phases
//! 2. hand the pending tick (if any) to the current screen
//! 3. poll the key and act on an accepted press
//! 4. advance the watch clock

use crate::knob::{Direction, KeyDebouncer, KnobConfig, KnobDecoder, KnobPins};
use crate::ui::{Dispatcher, DispatcherConfig, Frontend, Screen};

/// What happened during one [`App::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Knob tick consumed this pass.
    pub direction: Option<Direction>,
    /// A debounced key press was accepted.
    pub pressed: bool,
}

pub struct App {
    knob: KnobDecoder,
    key: KeyDebouncer,
    ui: Dispatcher,
}

impl App {
    pub fn new(knob: KnobConfig, key: KeyDebouncer, ui: DispatcherConfig) -> Self {
        Self {
            knob: KnobDecoder::new(knob),
            key,
            ui: Dispatcher::new(ui),
        }
    }

    /// Latch the knob's resting phases and show the watch face.
    pub fn start<P: KnobPins, F: Frontend>(&mut self, now_ms: u64, pins: &mut P, frontend: &mut F) {
        self.knob.initialize(now_ms, pins.read_phases());
        self.ui.start(now_ms, frontend);
        info!("App: started on {}", self.ui.screen());
    }

    pub fn tick<P: KnobPins, F: Frontend>(
        &mut self,
        now_ms: u64,
        pins: &mut P,
        frontend: &mut F,
    ) -> TickOutcome {
        self.knob.scan_tick(now_ms, pins.read_phases());
        let direction = self.ui.dispatch_tick(&mut self.knob, frontend);

        let pressed = self.key.poll(pins.key_active(), now_ms);
        if pressed {
            self.ui.on_key_press(now_ms, frontend);
        }

        self.ui.tick_watch(now_ms, frontend);

        TickOutcome { direction, pressed }
    }

    pub fn screen(&self) -> Screen {
        self.ui.screen()
    }

    pub fn knob(&self) -> &KnobDecoder {
        &self.knob
    }

    pub fn key(&self) -> &KeyDebouncer {
        &self.key
    }

    pub fn ui(&self) -> &Dispatcher {
        &self.ui
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(KnobConfig::new(), KeyDebouncer::new(), DispatcherConfig::new())
    }
}

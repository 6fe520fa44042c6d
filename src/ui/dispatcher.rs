//! Screen state machine.
//!
//! Key presses are the only way to change screens:
//!
//! ```text
//! Watch ──press──▶ Menu ──press(icon 0)──▶ Brightness ──press──▶ Menu
//!                   │  ──press(icon 1)──▶ Watch
//!                   │  ──press(icon 4)──▶ Weather ─────press──▶ Menu
//!                   └──press(other)───▶ Menu (beep only)
//! ```
//!
//! Knob ticks only change state inside a screen: the menu focus on Menu,
//! the backlight level on Brightness. The pending tick is taken from the
//! decoder every pass whatever the screen, so a tick made on the watch
//! face never leaks into the next screen.

use super::{Brightness, Frontend, MenuAction, MenuIndex, Screen, WatchFace};
use crate::config::{BRIGHTNESS_STEP, DEFAULT_BRIGHTNESS};
use crate::knob::{Direction, KnobDecoder};

/// Screen reached by pressing the key on `screen` with menu `focus`.
///
/// Total over every input; returns `screen` itself for a no-op press.
pub const fn next_screen(screen: Screen, focus: MenuIndex) -> Screen {
    match screen {
        Screen::Watch => Screen::Menu,
        Screen::Menu => match focus.action() {
            MenuAction::OpenBrightness => Screen::Brightness,
            MenuAction::ShowWatch => Screen::Watch,
            MenuAction::OpenWeather => Screen::Weather,
            MenuAction::Unassigned => Screen::Menu,
        },
        Screen::Brightness | Screen::Weather => Screen::Menu,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatcherConfig {
    /// Backlight change per knob tick.
    pub brightness_step: u8,
    /// Backlight level at power-on.
    pub default_brightness: u8,
}

impl DispatcherConfig {
    pub const fn new() -> Self {
        Self {
            brightness_step: BRIGHTNESS_STEP,
            default_brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Dispatcher {
    config: DispatcherConfig,
    screen: Screen,
    focus: MenuIndex,
    brightness: Brightness,
    watch: WatchFace,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            screen: Screen::Watch,
            focus: MenuIndex::FIRST,
            brightness: Brightness::new(config.default_brightness),
            watch: WatchFace::default(),
        }
    }

    /// Push the initial backlight and show the watch face.
    pub fn start<F: Frontend>(&mut self, now_ms: u64, frontend: &mut F) {
        frontend.set_backlight(self.brightness.level());
        frontend.set_brightness_percent(self.brightness.percent());
        self.switch_screen(Screen::Watch, now_ms, frontend);
    }

    pub fn switch_screen<F: Frontend>(&mut self, screen: Screen, now_ms: u64, frontend: &mut F) {
        info!("UI: {} -> {}", self.screen, screen);
        self.screen = screen;
        frontend.show_screen(screen);
        if screen == Screen::Watch {
            self.watch.enter(now_ms, frontend);
        }
    }

    /// Consume the decoder's pending tick (if any) and apply it to the
    /// current screen. Returns the consumed direction.
    pub fn dispatch_tick<F: Frontend>(
        &mut self,
        knob: &mut KnobDecoder,
        frontend: &mut F,
    ) -> Option<Direction> {
        let direction = knob.take_event()?;
        self.apply_direction(direction, frontend);
        Some(direction)
    }

    fn apply_direction<F: Frontend>(&mut self, direction: Direction, frontend: &mut F) {
        match self.screen {
            Screen::Menu => {
                let previous = self.focus;
                let focus = previous.step(direction);
                if focus != previous {
                    self.focus = focus;
                    frontend.set_menu_focus(previous, focus);
                    info!("Menu: focus {=usize}", focus.get());
                }
            }
            Screen::Brightness => {
                self.brightness = self.brightness.step(direction, self.config.brightness_step);
                let percent = self.brightness.percent();
                frontend.set_brightness_percent(percent);
                frontend.set_backlight(self.brightness.level());
                info!(
                    "Brightness: {=u8} ({=u8}%)",
                    self.brightness.level(),
                    percent
                );
            }
            Screen::Watch | Screen::Weather => {
                trace!("UI: {} ignored on {}", direction, self.screen);
            }
        }
    }

    /// Handle one debounced key press.
    pub fn on_key_press<F: Frontend>(&mut self, now_ms: u64, frontend: &mut F) {
        frontend.play_feedback();
        info!("Key: pressed on {}", self.screen);

        let next = next_screen(self.screen, self.focus);
        if next == self.screen {
            info!("Menu: no action for icon {=usize}", self.focus.get());
            return;
        }
        self.switch_screen(next, now_ms, frontend);
    }

    /// Advance the watch clock; hands are redrawn only on the watch face.
    pub fn tick_watch<F: Frontend>(&mut self, now_ms: u64, frontend: &mut F) {
        let visible = self.screen == Screen::Watch;
        self.watch.tick(now_ms, visible, frontend);
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focus(&self) -> MenuIndex {
        self.focus
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub fn watch(&self) -> &WatchFace {
        &self.watch
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::new())
    }
}

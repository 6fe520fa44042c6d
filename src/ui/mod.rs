//! User interface subsystem - screen navigation driven by the knob.
//!
//! The dispatcher keeps a small state machine over four screens and
//! turns knob ticks and key presses into calls on a [`Frontend`], which
//! owns everything visible or audible (panel, backlight, buzzer).
//!
//! ## Components
//!
//! - **Dispatcher**: current screen + per-screen knob semantics
//! - **Menu**: bounded icon focus
//! - **Brightness**: bounded backlight level and its percentage
//! - **Watch**: placeholder clock and hand angles

pub mod brightness;
pub mod dispatcher;
pub mod menu;
pub mod watch;


pub use brightness::Brightness;
pub use dispatcher::{next_screen, Dispatcher, DispatcherConfig};
pub use menu::{MenuAction, MenuIndex};
pub use watch::{ClockTime, HandAngles, WatchFace, WatchPhase};

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Analog watch face - shown at boot.
    #[default]
    Watch,
    /// Icon carousel - the knob moves the focus.
    Menu,
    /// Backlight level - the knob changes brightness.
    Brightness,
    /// Weather summary.
    Weather,
}

/// Everything the dispatcher can make the device show or do.
///
/// Calls are synchronous and infallible from the dispatcher's point of
/// view; an implementation that talks to hardware logs its own errors.
pub trait Frontend {
    /// Make `screen` the visible screen.
    fn show_screen(&mut self, screen: Screen);

    /// Move the menu highlight from `previous` to `current`.
    fn set_menu_focus(&mut self, previous: MenuIndex, current: MenuIndex);

    /// Update the on-screen brightness readout (0-100).
    fn set_brightness_percent(&mut self, percent: u8);

    /// Drive the physical backlight (0-255).
    fn set_backlight(&mut self, level: u8);

    /// Short confirmation tone for an accepted key press.
    fn play_feedback(&mut self);

    /// Sweep the hands from 12 o'clock to `target` (first watch load only).
    fn animate_hands(&mut self, target: HandAngles);

    /// Place the hands without animation.
    fn set_hands(&mut self, angles: HandAngles);
}

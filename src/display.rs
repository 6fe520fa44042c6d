//! SSD1306 OLED frontend.
//!
//! Split in two halves so the knob poll loop never waits on I²C:
//!
//! - [`Panel`] implements [`Frontend`] inside the poll loop. It only
//!   records what to show and posts a [`Frame`] snapshot.
//! - [`display_task`] owns the panel, redraws on each new snapshot and
//!   flushes over async TWIM. While the first-load hand sweep runs it also
//!   redraws every `SWEEP_FRAME_MS`.
//!
//! The panel has no backlight, so the backlight level is mapped onto the
//! SSD1306 contrast register.

use core::fmt::Write;

use defmt::warn;
use embassy_futures::select::{select, Either};
use embassy_nrf::{peripherals, twim::Twim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use micromath::F32Ext;
use ssd1306::mode::BufferedGraphicsModeAsync;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306Async;

use knobwatch::config::{DEFAULT_BRIGHTNESS, HAND_ANIMATION_DELAYS_MS, HAND_ANIMATION_DURATION_MS};
use knobwatch::ui::{Frontend, HandAngles, MenuIndex, Screen};
use knobwatch::Error;

use crate::buzzer;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// async I²C peripheral.
pub type Display<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// I²C bus the panel sits on.
pub type PanelBus = Twim<'static, peripherals::TWISPI0>;

/// Redraw period while the hands sweep in (ms).
const SWEEP_FRAME_MS: u64 = 40;

/// Menu icon captions, indexed by `MenuIndex`.
const MENU_LABELS: [&str; MenuIndex::COUNT] =
    ["Brightness", "Watch", "-", "-", "Weather", "-"];

/// Rows of the menu list visible at once.
const MENU_ROWS: usize = 4;

const DIAL_CENTER: Point = Point::new(96, 32);
const DIAL_RADIUS: u32 = 30;
/// Hand lengths (hour, minute, second) in pixels.
const HAND_LENGTHS: [f32; 3] = [14.0, 22.0, 26.0];

static FRAME_SIGNAL: Signal<CriticalSectionRawMutex, Frame> = Signal::new();

/// Initialise the SSD1306 display and clear the screen.
pub async fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().await.map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().await.map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

/// First-load sweep of the three hands from 12 o'clock.
#[derive(Clone, Copy)]
struct Sweep {
    started: Instant,
    target: HandAngles,
}

impl Sweep {
    /// Linear sweep with per-hand start delay. Also reports whether every
    /// hand has arrived.
    fn angles_at(&self, now: Instant) -> (HandAngles, bool) {
        let elapsed = now.duration_since(self.started).as_millis();
        let progress = |delay: u64, target: u16| -> u16 {
            let t = elapsed.saturating_sub(delay).min(HAND_ANIMATION_DURATION_MS);
            (target as u64 * t / HAND_ANIMATION_DURATION_MS) as u16
        };
        let [hour_delay, minute_delay, second_delay] = HAND_ANIMATION_DELAYS_MS;
        let angles = HandAngles {
            hour: progress(hour_delay, self.target.hour),
            minute: progress(minute_delay, self.target.minute),
            second: progress(second_delay, self.target.second),
        };
        let longest = hour_delay.max(minute_delay).max(second_delay);
        (angles, elapsed >= longest + HAND_ANIMATION_DURATION_MS)
    }
}

/// Everything needed to draw one screen.
#[derive(Clone, Copy)]
pub struct Frame {
    screen: Screen,
    focus: MenuIndex,
    percent: u8,
    hands: HandAngles,
    sweep: Option<Sweep>,
    contrast: u8,
}

/// Poll-loop side of the panel.
pub struct Panel {
    frame: Frame,
}

impl Panel {
    pub const fn new() -> Self {
        Self {
            frame: Frame {
                screen: Screen::Watch,
                focus: MenuIndex::FIRST,
                percent: 100,
                hands: HandAngles {
                    hour: 0,
                    minute: 0,
                    second: 0,
                },
                sweep: None,
                contrast: DEFAULT_BRIGHTNESS,
            },
        }
    }

    fn publish(&self) {
        FRAME_SIGNAL.signal(self.frame);
    }
}

impl Frontend for Panel {
    fn show_screen(&mut self, screen: Screen) {
        self.frame.screen = screen;
        self.publish();
    }

    fn set_menu_focus(&mut self, _previous: MenuIndex, current: MenuIndex) {
        self.frame.focus = current;
        self.publish();
    }

    fn set_brightness_percent(&mut self, percent: u8) {
        self.frame.percent = percent.min(100);
        self.publish();
    }

    fn set_backlight(&mut self, level: u8) {
        self.frame.contrast = level;
        self.publish();
    }

    fn play_feedback(&mut self) {
        buzzer::beep();
    }

    fn animate_hands(&mut self, target: HandAngles) {
        self.frame.hands = target;
        self.frame.sweep = Some(Sweep {
            started: Instant::now(),
            target,
        });
        self.publish();
    }

    fn set_hands(&mut self, angles: HandAngles) {
        self.frame.sweep = None;
        self.frame.hands = angles;
        self.publish();
    }
}

/// Owns the panel; draws every frame posted by [`Panel`].
#[embassy_executor::task]
pub async fn display_task(mut display: Display<PanelBus>) -> ! {
    let mut frame = FRAME_SIGNAL.wait().await;
    let mut contrast = None;
    loop {
        if contrast != Some(frame.contrast) {
            let level = Brightness::custom(1, frame.contrast);
            if display.set_brightness(level).await.is_err() {
                warn!("Display: {}", Error::Backlight);
            }
            contrast = Some(frame.contrast);
        }

        let hands = match frame.sweep {
            Some(sweep) => {
                let (angles, done) = sweep.angles_at(Instant::now());
                if done {
                    frame.sweep = None;
                }
                angles
            }
            None => frame.hands,
        };

        display.clear_buffer();
        match frame.screen {
            Screen::Watch => draw_watch(&mut display, hands),
            Screen::Menu => draw_menu(&mut display, frame.focus),
            Screen::Brightness => draw_brightness(&mut display, frame.percent),
            Screen::Weather => draw_weather(&mut display),
        }
        if display.flush().await.is_err() {
            warn!("Display: {}", Error::Display);
        }

        frame = if frame.sweep.is_some() {
            match select(FRAME_SIGNAL.wait(), Timer::after_millis(SWEEP_FRAME_MS)).await {
                Either::First(next) => next,
                Either::Second(()) => frame,
            }
        } else {
            FRAME_SIGNAL.wait().await
        };
    }
}

fn draw_watch<D>(target: &mut D, hands: HandAngles)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = Text::new("Watch", Point::new(0, 10), text_style(&FONT_6X10)).draw(target);

    let _ = Circle::with_center(DIAL_CENTER, DIAL_RADIUS * 2)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target);

    let angles = [hands.hour, hands.minute, hands.second];
    for (decidegrees, length) in angles.into_iter().zip(HAND_LENGTHS) {
        let radians = (decidegrees as f32 / 10.0).to_radians();
        let tip = DIAL_CENTER
            + Point::new(
                (length * radians.sin()) as i32,
                -(length * radians.cos()) as i32,
            );
        let _ = Line::new(DIAL_CENTER, tip)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target);
    }
}

fn draw_menu<D>(target: &mut D, focus: MenuIndex)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = Text::new("Menu", Point::new(0, 10), text_style(&FONT_6X10)).draw(target);

    // Scroll so the focused row stays in view.
    let first = focus.get().saturating_sub(MENU_ROWS - 1);
    for (row, index) in (first..MenuIndex::COUNT).take(MENU_ROWS).enumerate() {
        let marker = if index == focus.get() { ">" } else { " " };
        let mut line: heapless::String<16> = heapless::String::new();
        let _ = write!(line, "{} {}", marker, MENU_LABELS[index]);
        let y = 24 + (row as i32 * 10);
        let _ = Text::new(line.as_str(), Point::new(0, y), text_style(&FONT_6X10)).draw(target);
    }
}

fn draw_brightness<D>(target: &mut D, percent: u8)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = Text::new("Brightness", Point::new(0, 10), text_style(&FONT_6X10)).draw(target);

    let mut label: heapless::String<8> = heapless::String::new();
    let _ = write!(label, "{}%", percent);
    let _ = Text::new(label.as_str(), Point::new(0, 36), text_style(&FONT_10X20)).draw(target);

    let _ = Rectangle::new(Point::new(0, 48), Size::new(128, 10))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target);
    let fill = 128 * percent as u32 / 100;
    let _ = Rectangle::new(Point::new(0, 48), Size::new(fill, 10))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target);
}

fn draw_weather<D>(target: &mut D)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = Text::new("Weather", Point::new(0, 10), text_style(&FONT_6X10)).draw(target);
    let _ = Text::new("-- C", Point::new(0, 36), text_style(&FONT_10X20)).draw(target);
    let _ = Text::new("No forecast", Point::new(0, 52), text_style(&FONT_6X10)).draw(target);
}

//! Menu icon focus.
//!
//! The menu is a fixed row of `TOTAL_MENU_ICONS` icons. The focus is a
//! bounded index: knob ticks move it one icon at a time and stop at
//! either end instead of wrapping.

use crate::config::TOTAL_MENU_ICONS;
use crate::error::Error;
use crate::knob::Direction;

/// Index of a menu icon, always in `0..TOTAL_MENU_ICONS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuIndex(u8);

impl MenuIndex {
    pub const COUNT: usize = TOTAL_MENU_ICONS;
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self((TOTAL_MENU_ICONS - 1) as u8);

    pub fn new(index: usize) -> Result<Self, Error> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: Self::COUNT,
            })
        }
    }

    /// Clamp `index` into range.
    pub const fn saturating(index: usize) -> Self {
        if index < Self::COUNT {
            Self(index as u8)
        } else {
            Self::LAST
        }
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Icon to the right; stays on the last icon.
    pub const fn next(self) -> Self {
        Self::saturating(self.get() + 1)
    }

    /// Icon to the left; stays on the first icon.
    pub const fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Apply one knob tick.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Increment => self.next(),
            Direction::Decrement => self.prev(),
            Direction::None => self,
        }
    }

    /// What pressing the key on this icon does.
    pub const fn action(self) -> MenuAction {
        match self.0 {
            0 => MenuAction::OpenBrightness,
            1 => MenuAction::ShowWatch,
            4 => MenuAction::OpenWeather,
            _ => MenuAction::Unassigned,
        }
    }
}

impl TryFrom<usize> for MenuIndex {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

/// Key-press action bound to a menu icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    OpenBrightness,
    ShowWatch,
    OpenWeather,
    /// Icon has no screen yet; the press only beeps.
    Unassigned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_the_row_stops_at_each_end() {
        let mut focus = MenuIndex::FIRST;
        for expected in 1..MenuIndex::COUNT {
            focus = focus.next();
            assert_eq!(focus.get(), expected);
        }
        assert_eq!(focus.next(), MenuIndex::LAST);

        for expected in (0..MenuIndex::COUNT - 1).rev() {
            focus = focus.prev();
            assert_eq!(focus.get(), expected);
        }
        assert_eq!(focus.prev(), MenuIndex::FIRST);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(MenuIndex::new(5).map(MenuIndex::get), Ok(5));
        assert_eq!(
            MenuIndex::new(6),
            Err(Error::IndexOutOfRange { index: 6, len: 6 })
        );
        assert!(MenuIndex::try_from(usize::MAX).is_err());
    }

    #[test]
    fn saturating_clamps_to_last() {
        assert_eq!(MenuIndex::saturating(2).get(), 2);
        assert_eq!(MenuIndex::saturating(99), MenuIndex::LAST);
    }

    #[test]
    fn step_clamps_at_both_ends() {
        assert_eq!(MenuIndex::FIRST.step(Direction::Decrement), MenuIndex::FIRST);
        assert_eq!(MenuIndex::LAST.step(Direction::Increment), MenuIndex::LAST);
        assert_eq!(MenuIndex::FIRST.step(Direction::Increment).get(), 1);
        assert_eq!(MenuIndex::FIRST.step(Direction::None), MenuIndex::FIRST);
    }

    #[test]
    fn actions_per_icon() {
        let actions: [MenuAction; 6] = core::array::from_fn(|i| MenuIndex::saturating(i).action());
        assert_eq!(
            actions,
            [
                MenuAction::OpenBrightness,
                MenuAction::ShowWatch,
                MenuAction::Unassigned,
                MenuAction::Unassigned,
                MenuAction::OpenWeather,
                MenuAction::Unassigned,
            ]
        );
    }
}

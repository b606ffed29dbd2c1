use std::collections::HashSet;

use serde::Serialize;

use crate::session::DayOfWeek;
use super::time::{minutes_to_time, time_slots, time_to_minutes, TimeParseError};

/// Days shown by default. Sunday is a valid day value but is not rendered.
pub const DEFAULT_DAYS: [DayOfWeek; 6] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
];
pub const DEFAULT_FIRST_SLOT: &str = "08:00";
pub const DEFAULT_WINDOW_END: &str = "18:00";
pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_SLOT_HEIGHT_PX: u32 = 60;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridConfigError {
    #[error(transparent)]
    InvalidTime(#[from] TimeParseError),
    #[error("visible window {start}-{end} is empty")]
    EmptyWindow { start: String, end: String },
    #[error("slot granularity of {0} minutes must evenly divide 60")]
    Granularity(u32),
    #[error("visible window of {window} minutes is not a whole number of {slot}-minute slots")]
    MisalignedWindow { window: u32, slot: u32 },
    #[error("slot height must be greater than zero")]
    ZeroHeight,
    #[error("at least one visible day is required")]
    NoDays,
    #[error("day {0:?} is listed more than once")]
    DuplicateDay(DayOfWeek),
}

/// Coordinate system of the weekly grid: visible days, visible time window,
/// slot granularity and pixel height per slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    days: Vec<DayOfWeek>,
    first_slot_minutes: u32,
    window_end_minutes: u32,
    slot_minutes: u32,
    slot_height_px: u32,
}

impl GridConfig {
    pub fn new(
        days: Vec<DayOfWeek>,
        first_slot: &str,
        window_end: &str,
        slot_minutes: u32,
        slot_height_px: u32,
    ) -> Result<Self, GridConfigError> {
        let start = time_to_minutes(first_slot)?;
        let end = time_to_minutes(window_end)?;

        if end <= start {
            return Err(GridConfigError::EmptyWindow {
                start: first_slot.to_string(),
                end: window_end.to_string(),
            });
        }
        if slot_minutes == 0 || 60 % slot_minutes != 0 {
            return Err(GridConfigError::Granularity(slot_minutes));
        }
        if (end - start) % slot_minutes != 0 {
            return Err(GridConfigError::MisalignedWindow { window: end - start, slot: slot_minutes });
        }
        if slot_height_px == 0 {
            return Err(GridConfigError::ZeroHeight);
        }
        if days.is_empty() {
            return Err(GridConfigError::NoDays);
        }
        let mut seen = HashSet::new();
        for day in &days {
            if !seen.insert(*day) {
                return Err(GridConfigError::DuplicateDay(*day));
            }
        }

        Ok(Self {
            days,
            first_slot_minutes: start,
            window_end_minutes: end,
            slot_minutes,
            slot_height_px,
        })
    }

    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    pub fn shows_day(&self, day: DayOfWeek) -> bool {
        self.days.contains(&day)
    }

    pub fn first_slot_minutes(&self) -> u32 {
        self.first_slot_minutes
    }

    pub fn window_end_minutes(&self) -> u32 {
        self.window_end_minutes
    }

    pub fn first_slot(&self) -> String {
        minutes_to_time(self.first_slot_minutes)
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn slot_height_px(&self) -> u32 {
        self.slot_height_px
    }

    pub fn slot_count(&self) -> usize {
        ((self.window_end_minutes - self.first_slot_minutes) / self.slot_minutes) as usize
    }

    /// Start label of every slot row, top to bottom
    pub fn time_slots(&self) -> Vec<String> {
        time_slots(self.first_slot_minutes, self.window_end_minutes, self.slot_minutes)
    }

    /// Total pixel height of a day column
    pub fn column_height_px(&self) -> u32 {
        self.slot_count() as u32 * self.slot_height_px
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.to_vec(),
            first_slot_minutes: 8 * 60,
            window_end_minutes: 18 * 60,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            slot_height_px: DEFAULT_SLOT_HEIGHT_PX,
        }
    }
}

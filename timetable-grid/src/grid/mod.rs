pub mod time;
pub mod config;
pub mod layout;

pub use time::{minutes_to_time, time_to_minutes, TimeParseError};
pub use config::{GridConfig, GridConfigError};
pub use layout::{compute_slot_geometry, layout_week, slot_at, SlotGeometry, WeekLayout};

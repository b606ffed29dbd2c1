pub mod types;
pub mod error;
pub mod loader;
pub mod validation;

pub use types::{DayOfWeek, ScheduledSession, SessionType};
pub use error::SessionError;
pub use loader::{load_sessions, parse_sessions};
pub use validation::{partition_valid, validate_session, TimeRange};

#[cfg(test)]
pub(crate) mod fixtures;

use log::warn;

use crate::grid::time_to_minutes;
use super::{ScheduledSession, SessionError};

/// Validated start/end of a session in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }
}

/// Checks that both times parse and that the session ends strictly after it starts
pub fn validate_session(session: &ScheduledSession) -> Result<TimeRange, SessionError> {
    let parse = |value: &str| {
        time_to_minutes(value).map_err(|_| SessionError::InvalidTime {
            session_id: session.id.clone(),
            value: value.to_string(),
        })
    };
    let start = parse(&session.start_time)?;
    let end = parse(&session.end_time)?;

    if end <= start {
        return Err(SessionError::EmptyRange {
            session_id: session.id.clone(),
            start: session.start_time.clone(),
            end: session.end_time.clone(),
        });
    }

    Ok(TimeRange { start, end })
}

/// Splits sessions into those that can be positioned and those that cannot
pub fn partition_valid(
    sessions: &[ScheduledSession],
) -> (Vec<(&ScheduledSession, TimeRange)>, Vec<(&ScheduledSession, SessionError)>) {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();

    for session in sessions {
        match validate_session(session) {
            Ok(range) => valid.push((session, range)),
            Err(e) => {
                warn!("Skipping session {}: {}", session.id, e);
                rejected.push((session, e));
            }
        }
    }

    (valid, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::session;
    use crate::session::DayOfWeek;

    #[test]
    fn accepts_well_formed_session() {
        let s = session("s1", DayOfWeek::Monday, "09:00", "10:30");
        let range = validate_session(&s).unwrap();
        assert_eq!(range, TimeRange { start: 540, end: 630 });
        assert_eq!(range.duration(), 90);
    }

    #[test]
    fn rejects_unparsable_time() {
        let s = session("s1", DayOfWeek::Monday, "9h", "10:30");
        match validate_session(&s) {
            Err(SessionError::InvalidTime { session_id, value }) => {
                assert_eq!(session_id, "s1");
                assert_eq!(value, "9h");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_end_not_after_start() {
        let equal = session("eq", DayOfWeek::Monday, "10:00", "10:00");
        let reversed = session("rev", DayOfWeek::Monday, "11:00", "10:00");
        assert!(matches!(validate_session(&equal), Err(SessionError::EmptyRange { .. })));
        assert!(matches!(validate_session(&reversed), Err(SessionError::EmptyRange { .. })));
    }

    #[test]
    fn partition_keeps_every_session_once() {
        let sessions = vec![
            session("ok", DayOfWeek::Monday, "09:00", "10:00"),
            session("bad", DayOfWeek::Tuesday, "25:00", "26:00"),
            session("ok2", DayOfWeek::Sunday, "09:00", "10:00"),
        ];
        let (valid, rejected) = partition_valid(&sessions);
        let valid_ids: Vec<&str> = valid.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(valid_ids, vec!["ok", "ok2"]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0.id, "bad");
    }
}

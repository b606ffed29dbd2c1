use std::fs;
use std::path::Path;

use log::info;

use super::{ScheduledSession, SessionError};

/// Parses a JSON array of sessions as returned by the timetable API
pub fn parse_sessions(body: &[u8]) -> Result<Vec<ScheduledSession>, SessionError> {
    Ok(serde_json::from_slice(body)?)
}

/// Loads sessions from a JSON file
pub fn load_sessions<P: AsRef<Path>>(path: P) -> Result<Vec<ScheduledSession>, SessionError> {
    let path = path.as_ref();
    let body = fs::read(path)?;
    let sessions = parse_sessions(&body)?;
    info!("Loaded {} sessions from {}", sessions.len(), path.display());
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DayOfWeek;

    const BODY: &str = r#"[
        {
            "id": "42",
            "dayOfWeek": "wednesday",
            "startTime": "14:00",
            "endTime": "16:00",
            "subject": { "code": "PHY110", "name": "Mechanics" },
            "teacher": { "firstName": "Leila", "lastName": "Mansour" },
            "room": { "code": "LAB-3" },
            "sessionType": "practical",
            "isCancelled": true,
            "cancellationReason": "Lab maintenance"
        }
    ]"#;

    #[test]
    fn parses_json_body() {
        let sessions = parse_sessions(BODY.as_bytes()).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].day_of_week, DayOfWeek::Wednesday);
        assert!(sessions[0].is_cancelled);
        assert_eq!(sessions[0].cancellation_reason.as_deref(), Some("Lab maintenance"));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("timetable-grid-loader-{}.json", std::process::id()));
        fs::write(&path, BODY).unwrap();
        let sessions = load_sessions(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(sessions[0].room.code, "LAB-3");
    }

    #[test]
    fn reports_missing_file_and_bad_json() {
        assert!(matches!(load_sessions("/nonexistent/sessions.json"), Err(SessionError::Io(_))));
        assert!(matches!(parse_sessions(b"{not json"), Err(SessionError::Json(_))));
    }
}

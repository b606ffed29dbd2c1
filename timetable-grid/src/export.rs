use std::io::Write;

use csv::WriterBuilder;

use crate::grid::{compute_slot_geometry, GridConfig};
use crate::session::ScheduledSession;

const HEADERS: [&str; 15] = [
    "id",
    "day",
    "start_time",
    "end_time",
    "subject_code",
    "subject_name",
    "teacher",
    "room",
    "session_type",
    "is_cancelled",
    "cancellation_reason",
    "top_px",
    "height_px",
    "visible",
    "error",
];

/// Exports sessions with their computed grid placement as CSV.
///
/// Sessions that fail validation are still exported, with empty geometry and
/// the validation error in the last column.
pub fn export_sessions_to_csv<W: Write>(
    sessions: &[ScheduledSession],
    config: &GridConfig,
    out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(HEADERS)?;

    for session in sessions {
        let cancelled = if session.is_cancelled { "Yes" } else { "No" };
        let visible = if config.shows_day(session.day_of_week) { "Yes" } else { "No" };
        let reason = session.cancellation_reason.clone().unwrap_or_default();
        let (top, height, error) = match compute_slot_geometry(session, config) {
            Ok(geometry) => (geometry.top_px.to_string(), geometry.height_px.to_string(), String::new()),
            Err(e) => (String::new(), String::new(), e.to_string()),
        };

        wtr.write_record([
            session.id.as_str(),
            session.day_of_week.as_str(),
            session.start_time.as_str(),
            session.end_time.as_str(),
            session.subject.code.as_str(),
            session.subject.name.as_str(),
            session.teacher.full_name().as_str(),
            session.room.code.as_str(),
            session.session_type.as_str(),
            cancelled,
            reason.as_str(),
            top.as_str(),
            height.as_str(),
            visible,
            error.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::session;
    use crate::session::DayOfWeek;

    #[test]
    fn exports_geometry_and_errors() {
        let mut cancelled = session("b", DayOfWeek::Sunday, "10:00", "11:00");
        cancelled.is_cancelled = true;
        cancelled.cancellation_reason = Some("Holiday, campus closed".to_string());
        let sessions = vec![
            session("a", DayOfWeek::Monday, "09:00", "10:00"),
            cancelled,
            session("c", DayOfWeek::Friday, "12:00", "11:00"),
        ];

        let mut buf = Vec::new();
        export_sessions_to_csv(&sessions, &GridConfig::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id,day,start_time"));
        assert_eq!(
            lines[1],
            "a,monday,09:00,10:00,INF201,Databases,Karim Benali,A-12,lecture,No,,120,120,Yes,"
        );
        assert!(lines[2].contains("Yes,\"Holiday, campus closed\",240,120,No,"));
        assert!(lines[3].ends_with("session c: end time 11:00 is not after start time 12:00"));
    }
}

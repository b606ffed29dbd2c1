use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::grid::{GridConfig, WeekLayout};
use crate::render::{render_page, TimeGrid};
use crate::session::ScheduledSession;

/// Formats one session in the format: HH:MM-HH:MM CODE name (teacher, room) [type]
pub fn format_session_line(session: &ScheduledSession) -> String {
    let mut line = format!(
        "{}-{} {} {} ({}, {}) [{}]",
        session.start_time,
        session.end_time,
        session.subject.code,
        session.subject.name,
        session.teacher.full_name(),
        session.room.code,
        session.session_type.label()
    );
    if session.is_cancelled {
        line.push_str(" CANCELLED");
    }
    line
}

/// Writes the week in plain text, one block per visible day
pub fn write_week<W: Write>(out: &mut W, layout: &WeekLayout<'_>) -> std::io::Result<()> {
    for column in &layout.columns {
        writeln!(out, "** {} **", column.day.label())?;
        if column.blocks.is_empty() {
            writeln!(out, "  [NO SESSIONS]")?;
        }
        for block in &column.blocks {
            writeln!(out, "  {}", format_session_line(block.session))?;
        }
    }

    if !layout.rejected.is_empty() {
        writeln!(out, "⚠️  Sessions that could not be placed ({}):", layout.rejected.len())?;
        for (_, error) in &layout.rejected {
            writeln!(out, "  - {}", error)?;
        }
    }
    if layout.hidden > 0 {
        writeln!(out, "{} sessions fall on days that are not shown", layout.hidden)?;
    }
    Ok(())
}

/// Prints the week to stdout
pub fn print_week(sessions: &[ScheduledSession], config: &GridConfig) -> std::io::Result<()> {
    let grid = TimeGrid::new(sessions, config);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_week(&mut handle, &grid.layout())
}

/// Writes a read-only HTML timetable to a file
pub fn write_html_to_file<P: AsRef<Path>>(
    title: &str,
    sessions: &[ScheduledSession],
    config: &GridConfig,
    path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = TimeGrid::new(sessions, config).read_only(true);
    let mut file = File::create(path)?;
    file.write_all(render_page(title, &grid).into_string().as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::session;
    use crate::session::DayOfWeek;

    #[test]
    fn formats_cancelled_session() {
        let mut s = session("s1", DayOfWeek::Monday, "09:00", "10:30");
        s.is_cancelled = true;
        assert_eq!(
            format_session_line(&s),
            "09:00-10:30 INF201 Databases (Karim Benali, A-12) [Lecture] CANCELLED"
        );
    }

    #[test]
    fn writes_every_visible_day() {
        let config = GridConfig::default();
        let sessions = vec![
            session("a", DayOfWeek::Tuesday, "09:00", "10:00"),
            session("b", DayOfWeek::Sunday, "09:00", "10:00"),
            session("c", DayOfWeek::Tuesday, "10:00", "09:00"),
        ];
        let grid = TimeGrid::new(&sessions, &config);
        let mut out = Vec::new();
        write_week(&mut out, &grid.layout()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("** Monday **\n  [NO SESSIONS]\n** Tuesday **\n  09:00-10:00 INF201"));
        assert!(text.contains("** Saturday **"));
        assert!(!text.contains("Sunday"));
        assert!(text.contains("could not be placed (1)"));
        assert!(text.contains("1 sessions fall on days that are not shown"));
    }

    #[test]
    fn html_file_is_read_only() {
        let config = GridConfig::default();
        let sessions = vec![session("a", DayOfWeek::Monday, "09:00", "10:00")];
        let path = std::env::temp_dir().join(format!("timetable-grid-display-{}.html", std::process::id()));
        write_html_to_file("Week 12", &sessions, &config, &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(html.contains("top: 120px; height: 120px;"));
        assert!(!html.contains("data-action"));
    }
}

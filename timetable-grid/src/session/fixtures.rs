use super::types::{DayOfWeek, RoomRef, ScheduledSession, SessionType, SubjectRef, TeacherRef};

pub fn session(id: &str, day: DayOfWeek, start: &str, end: &str) -> ScheduledSession {
    ScheduledSession {
        id: id.to_string(),
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        subject: SubjectRef { code: "INF201".to_string(), name: "Databases".to_string() },
        teacher: TeacherRef { first_name: "Karim".to_string(), last_name: "Benali".to_string() },
        room: RoomRef { code: "A-12".to_string() },
        session_type: SessionType::Lecture,
        is_cancelled: false,
        cancellation_reason: None,
    }
}

pub fn typed(id: &str, day: DayOfWeek, start: &str, end: &str, kind: SessionType) -> ScheduledSession {
    ScheduledSession { session_type: kind, ..session(id, day, start, end) }
}

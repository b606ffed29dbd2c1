use serde::{Serialize, Deserialize};

/// Day a session takes place on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Lowercase key, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

/// Pedagogical category of a session, used only for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Lecture,
    Tutorial,
    Practical,
    Exam,
    Makeup,
}

impl SessionType {
    pub const ALL: [SessionType; 5] = [
        SessionType::Lecture,
        SessionType::Tutorial,
        SessionType::Practical,
        SessionType::Exam,
        SessionType::Makeup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Lecture => "lecture",
            SessionType::Tutorial => "tutorial",
            SessionType::Practical => "practical",
            SessionType::Exam => "exam",
            SessionType::Makeup => "makeup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Lecture => "Lecture",
            SessionType::Tutorial => "Tutorial",
            SessionType::Practical => "Practical",
            SessionType::Exam => "Exam",
            SessionType::Makeup => "Make-up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRef {
    pub first_name: String,
    pub last_name: String,
}

impl TeacherRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRef {
    pub code: String,
}

/// One scheduled class or exam occurrence, as supplied by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    pub id: String,
    pub day_of_week: DayOfWeek,
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
    pub subject: SubjectRef,
    pub teacher: TeacherRef,
    pub room: RoomRef,
    pub session_type: SessionType,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_api_payload() {
        let payload = json!({
            "id": "s-1",
            "dayOfWeek": "tuesday",
            "startTime": "10:00",
            "endTime": "11:30",
            "subject": { "code": "MATH101", "name": "Calculus I" },
            "teacher": { "firstName": "Amina", "lastName": "Haddad" },
            "room": { "code": "B-204" },
            "sessionType": "tutorial"
        });

        let session: ScheduledSession = serde_json::from_value(payload).unwrap();
        assert_eq!(session.day_of_week, DayOfWeek::Tuesday);
        assert_eq!(session.session_type, SessionType::Tutorial);
        assert!(!session.is_cancelled);
        assert_eq!(session.cancellation_reason, None);
        assert_eq!(session.teacher.full_name(), "Amina Haddad");
    }

    #[test]
    fn rejects_unknown_session_type() {
        let payload = json!({
            "id": "s-1",
            "dayOfWeek": "monday",
            "startTime": "10:00",
            "endTime": "11:00",
            "subject": { "code": "X", "name": "X" },
            "teacher": { "firstName": "A", "lastName": "B" },
            "room": { "code": "R" },
            "sessionType": "seminar"
        });

        assert!(serde_json::from_value::<ScheduledSession>(payload).is_err());
    }

    #[test]
    fn as_str_matches_serialized_form() {
        for day in DayOfWeek::ALL {
            assert_eq!(serde_json::to_value(day).unwrap(), json!(day.as_str()));
        }
        for kind in SessionType::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }
}

use chrono::{NaiveTime, Timelike};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid HH:MM time of day")]
pub struct TimeParseError(pub String);

/// Parses a time string (HH:MM, 24-hour) to minutes since midnight
pub fn time_to_minutes(time_str: &str) -> Result<u32, TimeParseError> {
    let trimmed = time_str.trim();
    // chrono accepts single-digit hours; the API always sends two
    if trimmed.len() != 5 {
        return Err(TimeParseError(time_str.to_string()));
    }
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| TimeParseError(time_str.to_string()))?;
    Ok(time.hour() * 60 + time.minute())
}

/// Formats minutes since midnight to time string (HH:MM)
pub fn minutes_to_time(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// Slot start labels from `start` (inclusive) to `end` (exclusive) every `step` minutes
pub fn time_slots(start: u32, end: u32, step: u32) -> Vec<String> {
    if step == 0 {
        return Vec::new();
    }
    (start..end)
        .step_by(step as usize)
        .map(minutes_to_time)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(time_to_minutes("00:00"), Ok(0));
        assert_eq!(time_to_minutes("08:00"), Ok(480));
        assert_eq!(time_to_minutes("09:30"), Ok(570));
        assert_eq!(time_to_minutes("23:59"), Ok(1439));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "8:00", "24:00", "12:60", "noon", "12-30", "12:30:00", "ab:cd"] {
            assert!(time_to_minutes(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn formats_minutes() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(570), "09:30");
        assert_eq!(minutes_to_time(1080), "18:00");
    }

    #[test]
    fn slot_labels_exclude_window_end() {
        let slots = time_slots(480, 600, 30);
        assert_eq!(slots, vec!["08:00", "08:30", "09:00", "09:30"]);
    }
}

/// Errors raised while loading or validating sessions
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session {session_id}: '{value}' is not a valid HH:MM time of day")]
    InvalidTime { session_id: String, value: String },
    #[error("session {session_id}: end time {end} is not after start time {start}")]
    EmptyRange { session_id: String, start: String, end: String },
    #[error("failed to read sessions: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse sessions: {0}")]
    Json(#[from] serde_json::Error),
}

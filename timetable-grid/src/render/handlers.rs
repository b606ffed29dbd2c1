use crate::grid::TimeParseError;
use crate::session::{DayOfWeek, ScheduledSession};

type SessionHandler<'a> = Box<dyn Fn(&ScheduledSession) + 'a>;
type SlotHandler<'a> = Box<dyn Fn(DayOfWeek, &str) + 'a>;

/// Callbacks the embedding page hands to the grid. Each one is optional; the
/// grid only exposes the affordances whose handler is present.
#[derive(Default)]
pub struct GridHandlers<'a> {
    on_edit: Option<SessionHandler<'a>>,
    on_delete: Option<SessionHandler<'a>>,
    on_slot_click: Option<SlotHandler<'a>>,
}

impl<'a> GridHandlers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_edit(mut self, handler: impl Fn(&ScheduledSession) + 'a) -> Self {
        self.on_edit = Some(Box::new(handler));
        self
    }

    pub fn on_delete(mut self, handler: impl Fn(&ScheduledSession) + 'a) -> Self {
        self.on_delete = Some(Box::new(handler));
        self
    }

    /// Receives the column's day and the clicked slot's start time (HH:MM)
    pub fn on_slot_click(mut self, handler: impl Fn(DayOfWeek, &str) + 'a) -> Self {
        self.on_slot_click = Some(Box::new(handler));
        self
    }

    pub fn has_edit(&self) -> bool {
        self.on_edit.is_some()
    }

    pub fn has_delete(&self) -> bool {
        self.on_delete.is_some()
    }

    pub fn has_slot_click(&self) -> bool {
        self.on_slot_click.is_some()
    }

    pub(crate) fn edit(&self, session: &ScheduledSession) -> bool {
        self.on_edit.as_ref().map(|f| f(session)).is_some()
    }

    pub(crate) fn delete(&self, session: &ScheduledSession) -> bool {
        self.on_delete.as_ref().map(|f| f(session)).is_some()
    }

    pub(crate) fn slot_click(&self, day: DayOfWeek, start_time: &str) -> bool {
        self.on_slot_click.as_ref().map(|f| f(day, start_time)).is_some()
    }
}

impl std::fmt::Debug for GridHandlers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridHandlers")
            .field("on_edit", &self.has_edit())
            .field("on_delete", &self.has_delete())
            .field("on_slot_click", &self.has_slot_click())
            .finish()
    }
}

/// Why an interaction was not delivered to a handler
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridActionError {
    #[error("the timetable is read-only")]
    ReadOnly,
    #[error("no {0} handler is registered")]
    Unsupported(&'static str),
    #[error("no session with id '{0}'")]
    UnknownSession(String),
    #[error("{0:?} is not shown in this timetable")]
    DayNotVisible(DayOfWeek),
    #[error("{0} is not the start of a visible slot")]
    SlotOutOfRange(String),
    #[error(transparent)]
    InvalidTime(#[from] TimeParseError),
}

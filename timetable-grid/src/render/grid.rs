use maud::{html, Markup};

use crate::grid::{layout_week, minutes_to_time, slot_at, time_to_minutes, GridConfig, SlotGeometry, WeekLayout};
use crate::session::{DayOfWeek, ScheduledSession};
use super::handlers::{GridActionError, GridHandlers};
use super::style::{render_legend, type_class};

/// Weekly time grid over a caller-owned list of sessions.
///
/// The grid never mutates its sessions. Slot clicks, edits and deletes are
/// forwarded to the handlers supplied by the caller, and only when the grid is
/// not read-only.
#[derive(Debug)]
pub struct TimeGrid<'a> {
    sessions: &'a [ScheduledSession],
    config: &'a GridConfig,
    read_only: bool,
    handlers: GridHandlers<'a>,
}

impl<'a> TimeGrid<'a> {
    pub fn new(sessions: &'a [ScheduledSession], config: &'a GridConfig) -> Self {
        Self {
            sessions,
            config,
            read_only: false,
            handlers: GridHandlers::default(),
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_handlers(mut self, handlers: GridHandlers<'a>) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn slot_clicks_enabled(&self) -> bool {
        !self.read_only && self.handlers.has_slot_click()
    }

    pub fn edit_enabled(&self) -> bool {
        !self.read_only && self.handlers.has_edit()
    }

    pub fn delete_enabled(&self) -> bool {
        !self.read_only && self.handlers.has_delete()
    }

    pub fn layout(&self) -> WeekLayout<'a> {
        layout_week(self.sessions, self.config)
    }

    /// Reports a click on the empty cell starting at `start_time` in `day`'s column
    pub fn click_slot(&self, day: DayOfWeek, start_time: &str) -> Result<(), GridActionError> {
        if self.read_only {
            return Err(GridActionError::ReadOnly);
        }
        if !self.handlers.has_slot_click() {
            return Err(GridActionError::Unsupported("slot-click"));
        }
        if !self.config.shows_day(day) {
            return Err(GridActionError::DayNotVisible(day));
        }
        let minutes = time_to_minutes(start_time)?;
        let on_boundary = slot_at(self.config, minutes)
            .is_some_and(|_| (minutes - self.config.first_slot_minutes()) % self.config.slot_minutes() == 0);
        if !on_boundary {
            return Err(GridActionError::SlotOutOfRange(start_time.to_string()));
        }

        self.handlers.slot_click(day, &minutes_to_time(minutes));
        Ok(())
    }

    pub fn edit(&self, session_id: &str) -> Result<(), GridActionError> {
        if self.read_only {
            return Err(GridActionError::ReadOnly);
        }
        if !self.handlers.has_edit() {
            return Err(GridActionError::Unsupported("edit"));
        }
        let session = self.find(session_id)?;
        self.handlers.edit(session);
        Ok(())
    }

    pub fn delete(&self, session_id: &str) -> Result<(), GridActionError> {
        if self.read_only {
            return Err(GridActionError::ReadOnly);
        }
        if !self.handlers.has_delete() {
            return Err(GridActionError::Unsupported("delete"));
        }
        let session = self.find(session_id)?;
        self.handlers.delete(session);
        Ok(())
    }

    fn find(&self, session_id: &str) -> Result<&'a ScheduledSession, GridActionError> {
        self.sessions
            .iter()
            .find(|s| s.id == session_id)
            .ok_or_else(|| GridActionError::UnknownSession(session_id.to_string()))
    }

    pub fn render(&self) -> Markup {
        let layout = self.layout();
        let slots = self.config.time_slots();
        let row_height = self.config.slot_height_px();
        let columns = format!("grid-template-columns: 72px repeat({}, minmax(120px, 1fr));", layout.columns.len());

        html! {
            div.timetable data-read-only[self.read_only] {
                div.timetable-grid style=(columns) {
                    div.grid-corner {}
                    @for column in &layout.columns {
                        div.day-header { (column.day.label()) }
                    }
                    div.time-column {
                        @for time in &slots {
                            div.time-label style={"height: " (row_height) "px;"} { (time) }
                        }
                    }
                    @for column in &layout.columns {
                        div.day-column data-day=(column.day.as_str())
                            style={"height: " (self.config.column_height_px()) "px;"} {
                            @for time in &slots {
                                (self.render_cell(column.day, time))
                            }
                            @for block in &column.blocks {
                                (self.render_session(block.session, block.geometry))
                            }
                        }
                    }
                }
                (render_legend())
                @if !layout.rejected.is_empty() {
                    div.rejected-sessions {
                        strong { "Sessions that could not be placed" }
                        ul {
                            @for (session, error) in &layout.rejected {
                                li data-session-id=(session.id) {
                                    (error.to_string())
                                    (self.render_actions(session))
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn render_cell(&self, day: DayOfWeek, time: &str) -> Markup {
        let style = format!("height: {}px;", self.config.slot_height_px());
        html! {
            @if self.slot_clicks_enabled() {
                button.slot-cell.clickable type="button" data-action="slot-click"
                    data-day=(day.as_str()) data-start=(time) title={"New session at " (time)}
                    style=(style) {}
            } @else {
                div.slot-cell style=(style) {}
            }
        }
    }

    fn render_session(&self, session: &ScheduledSession, geometry: SlotGeometry) -> Markup {
        let mut class = format!("session-block {}", type_class(session.session_type));
        if session.is_cancelled {
            class.push_str(" cancelled");
        }
        let position = format!("top: {}px; height: {}px;", geometry.top_px, geometry.height_px);

        html! {
            div class=(class) data-session-id=(session.id) data-type=(session.session_type.as_str()) style=(position) {
                div.session-code { (session.subject.code) }
                div.session-name { (session.subject.name) }
                div.session-meta { (session.teacher.full_name()) " · " (session.room.code) }
                div.session-time { (session.start_time) " - " (session.end_time) }
                @if session.is_cancelled {
                    div.cancelled-overlay { "Cancelled" }
                }
                (self.render_actions(session))
            }
        }
    }

    fn render_actions(&self, session: &ScheduledSession) -> Markup {
        html! {
            @if self.edit_enabled() || self.delete_enabled() {
                div.session-actions {
                    @if self.edit_enabled() {
                        button type="button" data-action="edit" data-session-id=(session.id) { "Edit" }
                    }
                    @if self.delete_enabled() {
                        button type="button" data-action="delete" data-session-id=(session.id) { "Delete" }
                    }
                }
            }
        }
    }
}

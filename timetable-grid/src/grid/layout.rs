use std::collections::BTreeMap;

use log::{info, warn};
use serde::Serialize;

use crate::session::{validate_session, DayOfWeek, ScheduledSession, SessionError, TimeRange};
use super::config::GridConfig;

/// Vertical placement of a session block inside its day column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotGeometry {
    pub top_px: f64,
    pub height_px: f64,
}

/// Geometry for an already validated time range. Not clamped to the visible window.
pub fn geometry_for_range(range: TimeRange, config: &GridConfig) -> SlotGeometry {
    let slot_minutes = config.slot_minutes() as f64;
    let slot_height = config.slot_height_px() as f64;
    let offset = range.start as f64 - config.first_slot_minutes() as f64;

    SlotGeometry {
        top_px: offset / slot_minutes * slot_height,
        height_px: range.duration() as f64 / slot_minutes * slot_height,
    }
}

/// Maps a session's start/end time to pixel offsets in the grid
pub fn compute_slot_geometry(session: &ScheduledSession, config: &GridConfig) -> Result<SlotGeometry, SessionError> {
    let range = validate_session(session)?;
    Ok(geometry_for_range(range, config))
}

/// Buckets sessions by day. Every configured day gets a bucket; sessions on a
/// day that is not configured are dropped.
pub fn partition_by_day<'a>(
    sessions: &'a [ScheduledSession],
    days: &[DayOfWeek],
) -> BTreeMap<DayOfWeek, Vec<&'a ScheduledSession>> {
    let mut buckets: BTreeMap<DayOfWeek, Vec<&ScheduledSession>> =
        days.iter().map(|day| (*day, Vec::new())).collect();

    for session in sessions {
        if let Some(bucket) = buckets.get_mut(&session.day_of_week) {
            bucket.push(session);
        }
    }

    buckets
}

/// Index of the slot row containing `minutes`, if inside the visible window
pub fn slot_at(config: &GridConfig, minutes: u32) -> Option<usize> {
    if minutes < config.first_slot_minutes() || minutes >= config.window_end_minutes() {
        return None;
    }
    Some(((minutes - config.first_slot_minutes()) / config.slot_minutes()) as usize)
}

#[derive(Debug, Clone, Copy)]
pub struct PlacedSession<'a> {
    pub session: &'a ScheduledSession,
    pub geometry: SlotGeometry,
}

#[derive(Debug)]
pub struct DayColumn<'a> {
    pub day: DayOfWeek,
    pub blocks: Vec<PlacedSession<'a>>,
}

/// Everything the renderer needs: one column per visible day in configured
/// order, plus the sessions that could not be positioned.
#[derive(Debug)]
pub struct WeekLayout<'a> {
    pub columns: Vec<DayColumn<'a>>,
    pub rejected: Vec<(&'a ScheduledSession, SessionError)>,
    pub hidden: usize,
}

pub fn layout_week<'a>(sessions: &'a [ScheduledSession], config: &GridConfig) -> WeekLayout<'a> {
    let buckets = partition_by_day(sessions, config.days());
    let bucketed: usize = buckets.values().map(Vec::len).sum();
    let mut rejected = Vec::new();

    let columns: Vec<DayColumn> = config
        .days()
        .iter()
        .map(|day| {
            let mut blocks = Vec::new();
            for &session in buckets.get(day).into_iter().flatten() {
                match validate_session(session) {
                    Ok(range) => blocks.push(PlacedSession {
                        session,
                        geometry: geometry_for_range(range, config),
                    }),
                    Err(e) => {
                        warn!("Skipping session {}: {}", session.id, e);
                        rejected.push((session, e));
                    }
                }
            }
            blocks.sort_by(|a, b| {
                a.geometry.top_px.total_cmp(&b.geometry.top_px).then_with(|| a.session.id.cmp(&b.session.id))
            });
            DayColumn { day: *day, blocks }
        })
        .collect();

    let hidden = sessions.len() - bucketed;
    if hidden > 0 {
        info!("{} sessions fall on days outside the visible grid", hidden);
    }

    WeekLayout { columns, rejected, hidden }
}

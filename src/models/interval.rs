use crate::models::event::EventId;
use crate::utils::time::Timestamp;
use chrono::Duration;
use serde::Serialize;

/// How an interval was closed (or not) during reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalStatus {
    /// entrada followed by salida
    Completed,
    /// entrada never closed: superseded by another entrada or still open at the end
    Open,
    /// salida with no open entrada before it
    Dangling,
    /// salida earlier than its entrada; never counted
    Invalid,
}

impl IntervalStatus {
    pub fn is_anomaly(&self) -> bool {
        !matches!(self, IntervalStatus::Completed)
    }
}

/// A derived span between a clock-in and its clock-out. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkInterval {
    pub employee_id: String,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub start_event: Option<EventId>,
    pub end_event: Option<EventId>,
    pub status: IntervalStatus,
}

impl WorkInterval {
    /// Defined only for completed intervals.
    pub fn duration(&self) -> Option<Duration> {
        match (self.status, self.start, self.end) {
            (IntervalStatus::Completed, Some(s), Some(e)) => Some(e - s),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == IntervalStatus::Completed
    }
}

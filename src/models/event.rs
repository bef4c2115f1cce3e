use super::{action::Action, location::GeoPoint};
use crate::utils::time::{Timestamp, format_detail};
use serde::Serialize;

/// Store-assigned identifier. Monotonic within a store.
pub type EventId = i64;

/// A validated scan that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub employee_id: String,
    pub action: Action,
    pub timestamp: Timestamp,
    pub location: Option<GeoPoint>,
}

impl NewEvent {
    /// Attach the id handed out by the store on append.
    pub fn into_stored(self, event_id: EventId) -> AttendanceEvent {
        AttendanceEvent {
            event_id,
            employee_id: self.employee_id,
            action: self.action,
            timestamp: self.timestamp,
            location: self.location,
        }
    }
}

/// An appended, immutable attendance record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceEvent {
    pub event_id: EventId,
    pub employee_id: String,
    pub action: Action,
    pub timestamp: Timestamp,
    pub location: Option<GeoPoint>,
}

impl AttendanceEvent {
    /// Composite ordering key: events sharing a timestamp fall back to store order.
    pub fn order_key(&self) -> (Timestamp, EventId) {
        (self.timestamp, self.event_id)
    }

    pub fn timestamp_str(&self) -> String {
        format_detail(&self.timestamp)
    }
}

/// Sort by `(timestamp, event_id)` ascending.
pub fn sort_events(events: &mut [AttendanceEvent]) {
    events.sort_by_key(|e| e.order_key());
}

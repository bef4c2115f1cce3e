use crate::models::action::Action;
use crate::models::event::{AttendanceEvent, sort_events};
use crate::models::interval::{IntervalStatus, WorkInterval};

/// Derived view of one employee's events over a window.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    pub events: Vec<AttendanceEvent>,
    pub intervals: Vec<WorkInterval>,
}

impl Timeline {
    pub fn completed(&self) -> impl Iterator<Item = &WorkInterval> {
        self.intervals.iter().filter(|i| i.is_completed())
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &WorkInterval> {
        self.intervals.iter().filter(|i| i.status.is_anomaly())
    }
}

/// Pair entradas with salidas for a single employee.
///
/// Events are re-sorted by `(timestamp, event_id)` first, so the result never depends on
/// the order they were handed in. Every event ends up in exactly one interval:
/// - entrada → salida: completed
/// - entrada superseded by another entrada, or left open at the end: open
/// - salida with nothing open: dangling
pub fn build_timeline(events: &[AttendanceEvent]) -> Timeline {
    if events.is_empty() {
        return Timeline::default();
    }

    let mut sorted = events.to_vec();
    sort_events(&mut sorted);

    let mut intervals = Vec::with_capacity(sorted.len());
    let mut open: Option<&AttendanceEvent> = None;

    for ev in &sorted {
        match ev.action {
            Action::Entrada => {
                // Duplicate entrada: keep the earlier one visible as an anomaly.
                if let Some(prev) = open.replace(ev) {
                    intervals.push(open_interval(prev));
                }
            }
            Action::Salida => match open.take() {
                Some(start) => intervals.push(close_interval(start, ev)),
                None => intervals.push(WorkInterval {
                    employee_id: ev.employee_id.clone(),
                    start: None,
                    end: Some(ev.timestamp),
                    start_event: None,
                    end_event: Some(ev.event_id),
                    status: IntervalStatus::Dangling,
                }),
            },
        }
    }

    if let Some(prev) = open {
        intervals.push(open_interval(prev));
    }

    Timeline {
        events: sorted,
        intervals,
    }
}

fn open_interval(start: &AttendanceEvent) -> WorkInterval {
    WorkInterval {
        employee_id: start.employee_id.clone(),
        start: Some(start.timestamp),
        end: None,
        start_event: Some(start.event_id),
        end_event: None,
        status: IntervalStatus::Open,
    }
}

fn close_interval(start: &AttendanceEvent, end: &AttendanceEvent) -> WorkInterval {
    // Unreachable after sorting; guards against a corrupted ordering key.
    let status = if end.timestamp < start.timestamp {
        IntervalStatus::Invalid
    } else {
        IntervalStatus::Completed
    };

    WorkInterval {
        employee_id: start.employee_id.clone(),
        start: Some(start.timestamp),
        end: Some(end.timestamp),
        start_event: Some(start.event_id),
        end_event: Some(end.event_id),
        status,
    }
}

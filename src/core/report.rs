//! Flat, presentation-ready rows built from events and totals.
//!
//! Pure formatting: nothing here changes a total, it only renders it.

use crate::models::employee::Employee;
use crate::models::event::AttendanceEvent;
use crate::models::location::GeoPoint;
use crate::models::weekly_total::WeeklyTotal;
use serde::Serialize;

pub const DEFAULT_UNAVAILABLE_MARKER: &str = "unavailable";

/// One line of an employee's detail listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub event_id: i64,
    pub employee_id: String,
    pub name: String,
    pub role: String,
    /// `YYYY-MM-DD HH:MM:SS` in the reference zone
    pub timestamp: String,
    pub action: String,
    pub location: String,
}

/// An employee plus their events, ready to print or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub rows: Vec<DetailRow>,
}

impl EmployeeDetail {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One line of the weekly summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub employee_id: String,
    pub name: String,
    pub total_hours: String,
    pub completed: usize,
    pub open: usize,
    pub dangling: usize,
    pub invalid: usize,
    pub anomalies: usize,
}

pub fn render_location(location: Option<&GeoPoint>, unavailable: &str) -> String {
    location.map_or_else(|| unavailable.to_string(), |p| p.to_string())
}

pub fn detail_rows(
    employee: &Employee,
    events: &[AttendanceEvent],
    unavailable: &str,
) -> Vec<DetailRow> {
    events
        .iter()
        .map(|ev| DetailRow {
            event_id: ev.event_id,
            employee_id: ev.employee_id.clone(),
            name: employee.name.clone(),
            role: employee.role.clone(),
            timestamp: ev.timestamp_str(),
            action: ev.action.as_str().to_string(),
            location: render_location(ev.location.as_ref(), unavailable),
        })
        .collect()
}

pub fn summary_row(total: &WeeklyTotal) -> SummaryRow {
    SummaryRow {
        employee_id: total.employee_id.clone(),
        name: total.name.clone(),
        total_hours: total.total_hours_str(),
        completed: total.completed_intervals,
        open: total.anomalies.open,
        dangling: total.anomalies.dangling,
        invalid: total.anomalies.invalid,
        anomalies: total.anomaly_count(),
    }
}

/// Rows in the order the totals were produced.
pub fn summary_rows(totals: &[WeeklyTotal]) -> Vec<SummaryRow> {
    totals.iter().map(summary_row).collect()
}

/// `(name, total_hours)` pairs.
pub fn summary_pairs(totals: &[WeeklyTotal]) -> Vec<(String, String)> {
    totals
        .iter()
        .map(|t| (t.name.clone(), t.total_hours_str()))
        .collect()
}

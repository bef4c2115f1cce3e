//! Weekly totals per employee over a reporting window.

use crate::core::reconstructor::{Timeline, build_timeline};
use crate::core::window::ReportWindow;
use crate::errors::AppResult;
use crate::models::event::AttendanceEvent;
use crate::models::interval::IntervalStatus;
use crate::models::weekly_total::{AnomalyCounts, WeeklyTotal};
use crate::store::{EmployeeDirectory, EventStore, OpContext};
use crate::utils::time::hundredths_of_hour;
use chrono::Duration;
use std::collections::HashSet;

pub const DEFAULT_MAX_LOOKBACK_HOURS: i64 = 24;

/// Tunables for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationPolicy {
    /// How far before the window start an entrada may be borrowed to close a shift.
    pub max_lookback: Duration,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            max_lookback: Duration::hours(DEFAULT_MAX_LOOKBACK_HOURS),
        }
    }
}

impl AggregationPolicy {
    pub fn with_lookback_hours(hours: i64) -> Self {
        Self {
            max_lookback: Duration::hours(hours.max(0)),
        }
    }
}

/// Compute one [`WeeklyTotal`] per employee with events in `window`, ordered by name
/// then employee id. `filter`, when given, restricts the employees considered.
pub fn aggregate<S, D>(
    store: &S,
    directory: &D,
    window: &ReportWindow,
    filter: Option<&[String]>,
    policy: &AggregationPolicy,
    ctx: &OpContext,
) -> AppResult<Vec<WeeklyTotal>>
where
    S: EventStore + ?Sized,
    D: EmployeeDirectory + ?Sized,
{
    let wanted: Option<HashSet<&str>> = filter.map(|ids| ids.iter().map(String::as_str).collect());

    let mut by_employee = store.list_all(window.start, window.end, ctx)?;
    if let Some(wanted) = &wanted {
        by_employee.retain(|id, _| wanted.contains(id.as_str()));
    }

    let mut totals = Vec::with_capacity(by_employee.len());

    for (employee_id, events) in by_employee {
        ctx.check()?;

        let prior = if starts_with_salida(&events) {
            store.last_before(&employee_id, window.start, ctx)?
        } else {
            None
        };
        let events = with_lookback(events, prior, window, policy);
        let timeline = build_timeline(&events);

        let name = match directory.resolve(&employee_id, ctx)? {
            Some(emp) => emp.name,
            None => {
                tracing::warn!(%employee_id, "events for employee missing from directory");
                employee_id.clone()
            }
        };

        totals.push(summarize(&employee_id, &name, &timeline));
    }

    sort_totals(&mut totals);
    Ok(totals)
}

fn starts_with_salida(events: &[AttendanceEvent]) -> bool {
    events
        .iter()
        .min_by_key(|e| e.order_key())
        .is_some_and(|e| e.action.is_salida())
}

/// Prepend `prior` when it is an entrada close enough to the window start to be the
/// beginning of a shift that ends inside the window.
pub fn with_lookback(
    mut events: Vec<AttendanceEvent>,
    prior: Option<AttendanceEvent>,
    window: &ReportWindow,
    policy: &AggregationPolicy,
) -> Vec<AttendanceEvent> {
    if let Some(prev) = prior
        && prev.action.is_entrada()
        && prev.timestamp < window.start
        && window.start - prev.timestamp <= policy.max_lookback
    {
        tracing::debug!(
            employee_id = %prev.employee_id,
            event_id = prev.event_id,
            "borrowing entrada from before the window"
        );
        events.insert(0, prev);
    }
    events
}

/// Fold a reconstructed timeline into a total. Only completed intervals count, and the
/// sum is rounded once.
pub fn summarize(employee_id: &str, name: &str, timeline: &Timeline) -> WeeklyTotal {
    let mut worked = Duration::zero();
    let mut completed_intervals = 0;
    let mut anomalies = AnomalyCounts::default();

    for interval in &timeline.intervals {
        match interval.status {
            IntervalStatus::Completed => {
                completed_intervals += 1;
                worked += interval.duration().unwrap_or_else(Duration::zero);
            }
            IntervalStatus::Open => anomalies.open += 1,
            IntervalStatus::Dangling => anomalies.dangling += 1,
            IntervalStatus::Invalid => anomalies.invalid += 1,
        }
    }

    WeeklyTotal {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        worked_millis: worked.num_milliseconds(),
        total_hundredths: hundredths_of_hour(worked.num_milliseconds()),
        completed_intervals,
        anomalies,
    }
}

pub fn sort_totals(totals: &mut [WeeklyTotal]) {
    totals.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
}

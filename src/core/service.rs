//! The three operations exposed to collaborators (capture UI, admin screen, exporter),
//! plus the directory listing the admin screen needs.

use crate::core::aggregator::{AggregationPolicy, aggregate};
use crate::core::report::{DEFAULT_UNAVAILABLE_MARKER, EmployeeDetail, detail_rows};
use crate::core::validator::ScanValidator;
use crate::core::window::ReportWindow;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::event::EventId;
use crate::models::raw_scan::RawScan;
use crate::models::weekly_total::WeeklyTotal;
use crate::store::{CancelToken, EmployeeDirectory, EventStore, OpContext};
use crate::utils::time::Timestamp;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Upper bound on any single store call; `None` waits as long as the store does.
    pub timeout: Option<Duration>,
    pub policy: AggregationPolicy,
    pub unavailable_marker: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            policy: AggregationPolicy::default(),
            unavailable_marker: DEFAULT_UNAVAILABLE_MARKER.to_string(),
        }
    }
}

pub struct AttendanceService<S, D> {
    store: S,
    directory: D,
    options: ServiceOptions,
}

impl<S: EventStore, D: EmployeeDirectory> AttendanceService<S, D> {
    pub fn new(store: S, directory: D, options: ServiceOptions) -> Self {
        Self {
            store,
            directory,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn context(&self, cancel: &CancelToken) -> OpContext {
        OpContext::new(cancel.clone(), self.options.timeout)
    }

    /// Validate and append one scan. Nothing is stored unless an id is returned.
    pub fn submit_event(&self, raw: &RawScan, cancel: &CancelToken) -> AppResult<EventId> {
        let ctx = self.context(cancel);

        let event = match ScanValidator::validate(raw, &self.directory, &ctx) {
            Ok(ev) => ev,
            Err(e) => {
                tracing::warn!(error = %e, "scan rejected");
                return Err(e);
            }
        };

        let employee_id = event.employee_id.clone();
        let action = event.action;
        let id = self.store.append(event, &ctx)?;

        tracing::info!(event_id = id, %employee_id, %action, "scan accepted");
        Ok(id)
    }

    /// [`Self::submit_event`] for a JSON document as posted by a scanner.
    pub fn submit_json(&self, payload: &str, cancel: &CancelToken) -> AppResult<EventId> {
        let raw = RawScan::from_json(payload).inspect_err(|e| {
            tracing::warn!(error = %e, "scan rejected");
        })?;
        self.submit_event(&raw, cancel)
    }

    /// Ordered detail listing for one employee, optionally bounded to `[from, to)`.
    pub fn get_employee_detail(
        &self,
        employee_id: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        cancel: &CancelToken,
    ) -> AppResult<EmployeeDetail> {
        if let (Some(f), Some(t)) = (&from, &to)
            && f >= t
        {
            return Err(AppError::InvalidWindow(format!(
                "from {} is not before to {}",
                f.to_rfc3339(),
                t.to_rfc3339()
            )));
        }

        let ctx = self.context(cancel);
        let employee = self
            .directory
            .resolve(employee_id, &ctx)?
            .ok_or_else(|| AppError::UnknownEmployee(employee_id.to_string()))?;

        let events = self.store.list_by_employee(employee_id, from, to, &ctx)?;
        tracing::debug!(%employee_id, events = events.len(), "detail listing");

        Ok(EmployeeDetail {
            rows: detail_rows(&employee, &events, &self.options.unavailable_marker),
            employee,
        })
    }

    /// Weekly totals for every employee with events in `window`, or only those in `filter`.
    pub fn get_weekly_report(
        &self,
        window: &ReportWindow,
        filter: Option<&[String]>,
        cancel: &CancelToken,
    ) -> AppResult<Vec<WeeklyTotal>> {
        let ctx = self.context(cancel);
        let totals = aggregate(
            &self.store,
            &self.directory,
            window,
            filter,
            &self.options.policy,
            &ctx,
        )?;

        let anomalies: usize = totals.iter().map(WeeklyTotal::anomaly_count).sum();
        tracing::info!(
            window = %window,
            employees = totals.len(),
            anomalies,
            "weekly report computed"
        );
        Ok(totals)
    }

    pub fn list_employees(&self, cancel: &CancelToken) -> AppResult<Vec<Employee>> {
        let ctx = self.context(cancel);
        Ok(self.directory.list_employees(&ctx)?)
    }
}

use crate::utils::time::format_hours;
use serde::Serialize;

/// Data-quality findings for one employee in one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnomalyCounts {
    pub open: usize,
    pub dangling: usize,
    pub invalid: usize,
}

impl AnomalyCounts {
    pub fn total(&self) -> usize {
        self.open + self.dangling + self.invalid
    }
}

/// Hours worked by one employee over a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTotal {
    pub employee_id: String,
    pub name: String,
    /// Exact sum of completed interval durations, in milliseconds.
    pub worked_millis: i64,
    /// Hours rounded half-up to two decimals, kept as an integer count of hundredths.
    pub total_hundredths: i64,
    pub completed_intervals: usize,
    pub anomalies: AnomalyCounts,
}

impl WeeklyTotal {
    /// `8.50`, `7.92`, ...
    pub fn total_hours_str(&self) -> String {
        format_hours(self.total_hundredths)
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies.total()
    }
}

// src/export/model.rs

use crate::core::report::{DetailRow, SummaryRow};
use serde::Serialize;

/// How a column is written to a spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellKind {
    /// Written verbatim; ids stay text so leading zeros survive.
    Text,
    Integer,
    /// Two decimals (hours).
    Decimal,
    DateTime,
}

/// A flat record that can be exported to CSV / JSON / XLSX.
pub(crate) trait Tabular: Serialize {
    fn headers() -> &'static [&'static str];
    fn kinds() -> &'static [CellKind];
    fn to_row(&self) -> Vec<String>;
}

impl Tabular for SummaryRow {
    fn headers() -> &'static [&'static str] {
        &[
            "employee_id",
            "name",
            "total_hours",
            "completed",
            "open",
            "dangling",
            "invalid",
            "anomalies",
        ]
    }

    fn kinds() -> &'static [CellKind] {
        use CellKind::*;
        &[Text, Text, Decimal, Integer, Integer, Integer, Integer, Integer]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.employee_id.clone(),
            self.name.clone(),
            self.total_hours.clone(),
            self.completed.to_string(),
            self.open.to_string(),
            self.dangling.to_string(),
            self.invalid.to_string(),
            self.anomalies.to_string(),
        ]
    }
}

impl Tabular for DetailRow {
    fn headers() -> &'static [&'static str] {
        &[
            "event_id",
            "employee_id",
            "name",
            "role",
            "timestamp",
            "action",
            "location",
        ]
    }

    fn kinds() -> &'static [CellKind] {
        use CellKind::*;
        &[Integer, Text, Text, Text, DateTime, Text, Text]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.event_id.to_string(),
            self.employee_id.clone(),
            self.name.clone(),
            self.role.clone(),
            self.timestamp.clone(),
            self.action.clone(),
            self.location.clone(),
        ]
    }
}

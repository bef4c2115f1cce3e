// src/export/logic.rs

use crate::core::report::{DetailRow, summary_rows};
use crate::core::service::AttendanceService;
use crate::core::window::ReportWindow;
use crate::errors::AppResult;
use crate::export::fs_utils::{ensure_absolute, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::Tabular;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind};
use crate::store::{CancelToken, EmployeeDirectory, EventStore};
use crate::ui::messages::warning;
use std::path::Path;

/// High level export driver.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the weekly summary or the detail listing for `window`.
    ///
    /// - `file` must be an absolute path
    /// - `employees` restricts the export to those ids
    ///
    /// Returns the number of data rows written; nothing is written when there are none.
    #[allow(clippy::too_many_arguments)]
    pub fn export<S: EventStore, D: EmployeeDirectory>(
        service: &AttendanceService<S, D>,
        kind: ExportKind,
        format: ExportFormat,
        file: &str,
        window: &ReportWindow,
        employees: Option<&[String]>,
        force: bool,
        cancel: &CancelToken,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_absolute(path)?;
        ensure_writable(path, force)?;

        match kind {
            ExportKind::Weekly => {
                let totals = service.get_weekly_report(window, employees, cancel)?;
                write_rows(&summary_rows(&totals), format, "weekly", path)
            }
            ExportKind::Detail => {
                let rows = Self::detail_rows(service, window, employees, cancel)?;
                write_rows(&rows, format, "detail", path)
            }
        }
    }

    /// Detail rows of every selected employee, grouped by employee in directory order.
    pub fn detail_rows<S: EventStore, D: EmployeeDirectory>(
        service: &AttendanceService<S, D>,
        window: &ReportWindow,
        employees: Option<&[String]>,
        cancel: &CancelToken,
    ) -> AppResult<Vec<DetailRow>> {
        let ids: Vec<String> = match employees {
            Some(ids) => ids.to_vec(),
            None => service
                .list_employees(cancel)?
                .into_iter()
                .map(|e| e.employee_id)
                .collect(),
        };

        let mut rows = Vec::new();
        for id in ids {
            let detail =
                service.get_employee_detail(&id, Some(window.start), Some(window.end), cancel)?;
            rows.extend(detail.rows);
        }
        Ok(rows)
    }
}

fn write_rows<T: Tabular>(
    rows: &[T],
    format: ExportFormat,
    sheet: &str,
    path: &Path,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No events found for the selected window. Nothing to export.");
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, sheet, path)?,
    }

    Ok(rows.len())
}

use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::service::AttendanceService;
use crate::errors::{AppError, AppResult};
use crate::store::CancelToken;
use crate::ui::messages::{header, warning};
use crate::utils::table::Table;
use crate::utils::time::{Timestamp, start_of_day};
use chrono::{Days, NaiveDate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List {
        employee,
        from,
        to,
        json,
    } = cmd
    else {
        return Ok(());
    };

    let from_ts = from.as_deref().map(|d| day_bound(d, 0)).transpose()?;
    let to_ts = to.as_deref().map(|d| day_bound(d, 1)).transpose()?;

    let store = open_store(cfg)?;
    let service = AttendanceService::new(&store, &store, cfg.service_options());
    let detail = service.get_employee_detail(employee, from_ts, to_ts, &CancelToken::new())?;

    if *json {
        let out = serde_json::to_string_pretty(&detail)
            .map_err(|e| AppError::Export(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    header(format!(
        "{} ({}) {}",
        detail.employee.name, detail.employee.employee_id, detail.employee.role
    ));

    if detail.is_empty() {
        warning("No scans in the selected period.");
        return Ok(());
    }

    let mut table = Table::new(&["ID", "TIMESTAMP", "ACTION", "LOCATION"]);
    for row in &detail.rows {
        table.add_row(vec![
            row.event_id.to_string(),
            row.timestamp.clone(),
            row.action.clone(),
            row.location.clone(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

/// Midnight of `date + offset_days` in the reference zone.
fn day_bound(date: &str, offset_days: u64) -> AppResult<Timestamp> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.checked_add_days(Days::new(offset_days)))
        .and_then(start_of_day)
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))
}

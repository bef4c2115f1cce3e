use crate::cli::commands::{employee_filter, open_store, resolve_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::summary_rows;
use crate::core::service::AttendanceService;
use crate::errors::{AppError, AppResult};
use crate::store::CancelToken;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_anomalies};
use crate::utils::table::Table;
use crate::utils::time::format_hours;

/// Handle `report`: the weekly cut, printed as a table or JSON.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        window,
        employees,
        json,
    } = cmd
    else {
        return Ok(());
    };

    let window = resolve_window(window, cfg)?;
    let store = open_store(cfg)?;
    let service = AttendanceService::new(&store, &store, cfg.service_options());

    let totals = service.get_weekly_report(&window, employee_filter(employees), &CancelToken::new())?;
    let rows = summary_rows(&totals);

    if *json {
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| AppError::Export(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    header(format!("Weekly hours: {window}"));

    if rows.is_empty() {
        warning("No scans in the selected window.");
        return Ok(());
    }

    let mut table = Table::new(&["NAME", "ID", "HOURS", "ANOMALIES"]);
    for r in &rows {
        table.add_row(vec![
            r.name.clone(),
            r.employee_id.clone(),
            r.total_hours.clone(),
            r.anomalies.to_string(),
        ]);
    }
    print!("{}", table.render());

    let grand: i64 = totals.iter().map(|t| t.total_hundredths).sum();
    let anomalies: usize = rows.iter().map(|r| r.anomalies).sum();
    println!(
        "\nTotal: {} h | {}Anomalies: {}{}",
        format_hours(grand),
        color_for_anomalies(anomalies),
        anomalies,
        RESET
    );

    Ok(())
}

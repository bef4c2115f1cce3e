use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::service::AttendanceService;
use crate::errors::AppResult;
use crate::models::raw_scan::RawScan;
use crate::store::{CancelToken, OpContext};
use crate::ui::messages::success;
use crate::utils::colors::colorize_action;
use crate::utils::time::{format_detail, now};
use std::fs;

/// Handle `scan`: one raw payload in, one event id out.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Scan {
        payload,
        file,
        employee,
        action,
        at,
        lat,
        lon,
    } = cmd
    else {
        return Ok(());
    };

    let raw = match (payload, file) {
        (Some(json), _) => RawScan::from_json(json)?,
        (None, Some(path)) => RawScan::from_json(&fs::read_to_string(path)?)?,
        (None, None) => {
            // Capture time is "now" unless the device supplied one.
            let timestamp = at.clone().unwrap_or_else(|| now().to_rfc3339());
            let location = lat.zip(*lon);
            RawScan::new(
                employee.as_deref().unwrap_or_default(),
                action.as_deref().unwrap_or_default(),
                &timestamp,
                location,
            )
        }
    };

    let store = open_store(cfg)?;
    let service = AttendanceService::new(&store, &store, cfg.service_options());
    let id = service.submit_event(&raw, &CancelToken::new())?;

    let stored = store
        .event_by_id(id, &OpContext::unbounded())?
        .map(|ev| {
            format!(
                " ({} {} at {})",
                colorize_action(ev.action.as_str(), ev.action.is_entrada()),
                ev.employee_id,
                format_detail(&ev.timestamp)
            )
        })
        .unwrap_or_default();

    success(format!("Scan #{id} recorded{stored}"));
    Ok(())
}

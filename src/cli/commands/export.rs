use crate::cli::commands::{employee_filter, open_store, resolve_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::service::AttendanceService;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::CancelToken;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        file,
        window,
        employees,
        force,
    } = cmd
    {
        let window = resolve_window(window, cfg)?;
        let store = open_store(cfg)?;
        let service = AttendanceService::new(&store, &store, cfg.service_options());

        ExportLogic::export(
            &service,
            *kind,
            *format,
            file,
            &window,
            employee_filter(employees),
            *force,
            &CancelToken::new(),
        )?;
    }
    Ok(())
}

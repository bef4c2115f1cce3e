pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod scan;

use crate::cli::parser::WindowArgs;
use crate::config::Config;
use crate::core::window::ReportWindow;
use crate::db::SqliteStore;
use crate::db::migrate::AppliedMigration;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    SqliteStore::open(&cfg.database)
}

/// `--week` / `--range`, or the current weekly cut.
pub(crate) fn resolve_window(args: &WindowArgs, cfg: &Config) -> AppResult<ReportWindow> {
    match (&args.week, &args.range) {
        (Some(week), _) => ReportWindow::parse_iso_week(week),
        (None, Some(range)) => ReportWindow::parse_range(range),
        (None, None) => ReportWindow::current_week(cfg.week_start_day()?),
    }
}

/// Empty `--employee` list means everyone.
pub(crate) fn employee_filter(ids: &[String]) -> Option<&[String]> {
    (!ids.is_empty()).then_some(ids)
}

/// One status line per applied migration. Only `init` and `db --migrate` call this.
pub(crate) fn report_migrations(applied: &[AppliedMigration]) {
    for m in applied {
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }
}

use crate::db::migrate::{AppliedMigration, run_pending_migrations};
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<Vec<AppliedMigration>> {
    run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))
}

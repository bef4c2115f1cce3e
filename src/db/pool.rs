//! SQLite connection wrapper (one connection per process is plenty for a scan backend).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

/// How long SQLite waits on a locked database file before reporting SQLITE_BUSY.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::configure(&conn)?;
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        // Readers keep working on a snapshot while a scan is being appended.
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        Ok(())
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T, E>(&mut self, func: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Connection) -> std::result::Result<T, E>,
    {
        func(&mut self.conn)
    }
}

//! Schema migrations.
//!
//! Applied versions are recorded in the `log` table as `operation = 'migration_applied'`,
//! `target = <version>`. Each migration runs in its own transaction together with that
//! marker row, so a failed migration leaves no trace and is retried on the next start.

use crate::db::log::ttlog;
use rusqlite::{Connection, OptionalExtension, Result};

/// A migration that has just been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: &'static str,
    pub description: &'static str,
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250106_0001_create_employees",
        description: "Created employees table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            employee_id  TEXT PRIMARY KEY NOT NULL CHECK(length(employee_id) > 0),
            name         TEXT NOT NULL,
            role         TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_employees_name ON employees(name, employee_id);
        "#,
    },
    Migration {
        version: "20250106_0002_create_events",
        description: "Created events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL REFERENCES employees(employee_id),
            action       TEXT NOT NULL CHECK(action IN ('entrada','salida')),
            ts_utc       INTEGER NOT NULL,
            ts_local     TEXT NOT NULL,
            latitude     REAL CHECK(latitude IS NULL OR (latitude BETWEEN -90 AND 90)),
            longitude    REAL CHECK(longitude IS NULL OR (longitude BETWEEN -180 AND 180)),
            source       TEXT NOT NULL DEFAULT 'scan',
            created_at   TEXT NOT NULL,
            CHECK((latitude IS NULL) = (longitude IS NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_events_employee_ts ON events(employee_id, ts_utc, id);
        CREATE INDEX IF NOT EXISTS idx_events_ts ON events(ts_utc, id);
        "#,
    },
    Migration {
        version: "20250106_0003_events_append_only",
        description: "Events table is append-only",
        sql: r#"
        CREATE TRIGGER IF NOT EXISTS events_no_update
        BEFORE UPDATE ON events
        BEGIN
            SELECT RAISE(ABORT, 'events are append-only');
        END;

        CREATE TRIGGER IF NOT EXISTS events_no_delete
        BEFORE DELETE ON events
        BEGIN
            SELECT RAISE(ABORT, 'events are append-only');
        END;
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded, in application order.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations and return the ones applied.
/// Nothing is printed; callers decide whether to report them.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)?;
        ttlog(&tx, "migration_applied", m.version, m.description)?;
        tx.commit()?;

        tracing::info!(version = m.version, "migration applied");
        applied.push(AppliedMigration {
            version: m.version,
            description: m.description,
        });
    }

    Ok(applied)
}

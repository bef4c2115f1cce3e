//! SQLite-backed [`EventStore`] and [`EmployeeDirectory`].

use crate::db::initialize::init_db;
use crate::db::log::{LogEntry, load_log, ttlog};
use crate::db::migrate::AppliedMigration;
use crate::db::pool::{DEFAULT_BUSY_TIMEOUT, DbPool};
use crate::db::queries;
use crate::errors::{AppError, AppResult, StoreError};
use crate::models::employee::Employee;
use crate::models::event::{AttendanceEvent, EventId, NewEvent};
use crate::store::{EmployeeDirectory, EventStore, OpContext};
use crate::utils::time::Timestamp;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::sync::Mutex;

pub struct SqliteStore {
    pool: Mutex<DbPool>,
    path: String,
    migrated: Vec<AppliedMigration>,
}

impl SqliteStore {
    /// Open (creating if needed) the database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        let migrated = init_db(&pool.conn)?;
        Ok(Self {
            pool: Mutex::new(pool),
            path: path.to_string(),
            migrated,
        })
    }

    /// Migrations applied by [`Self::open`], empty when the schema was already current.
    pub fn migrations_applied(&self) -> &[AppliedMigration] {
        &self.migrated
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run `func` with exclusive access to the connection, honoring the context both while
    /// waiting for the connection and while SQLite waits on the file lock.
    fn with_conn<T>(
        &self,
        ctx: &OpContext,
        func: impl FnOnce(&mut Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut pool = ctx.acquire(|| self.pool.try_lock())?;
        pool.conn
            .busy_timeout(ctx.remaining().unwrap_or(DEFAULT_BUSY_TIMEOUT))?;
        ctx.check()?;
        pool.with_conn(func)
    }

    pub fn register_employee(&self, employee: &Employee, ctx: &OpContext) -> AppResult<()> {
        let mut duplicate = false;
        self.with_conn(ctx, |conn| {
            let tx = conn.transaction()?;
            if queries::load_employee(&tx, &employee.employee_id)?.is_some() {
                duplicate = true;
                return Ok(());
            }
            queries::insert_employee(&tx, employee)?;
            ttlog(
                &tx,
                "employee_add",
                &employee.employee_id,
                &format!("Registered {} ({})", employee.name, employee.role),
            )?;
            ctx.check()?;
            tx.commit()?;
            Ok(())
        })?;

        if duplicate {
            return Err(AppError::DuplicateEmployee(employee.employee_id.clone()));
        }
        tracing::info!(employee_id = %employee.employee_id, "employee registered");
        Ok(())
    }

    pub fn event_by_id(&self, id: EventId, ctx: &OpContext) -> AppResult<Option<AttendanceEvent>> {
        Ok(self.with_conn(ctx, |conn| Ok(queries::load_event(conn, id)?))?)
    }

    /// Write a free-form audit line.
    pub fn audit(&self, operation: &str, target: &str, message: &str, ctx: &OpContext) -> AppResult<()> {
        self.with_conn(ctx, |conn| Ok(ttlog(conn, operation, target, message)?))?;
        Ok(())
    }

    pub fn audit_log(&self, ctx: &OpContext) -> AppResult<Vec<LogEntry>> {
        Ok(self.with_conn(ctx, |conn| Ok(load_log(conn)?))?)
    }

    /// Run arbitrary maintenance against the underlying connection.
    pub fn maintenance<T>(
        &self,
        ctx: &OpContext,
        func: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> AppResult<T> {
        Ok(self.with_conn(ctx, |conn| Ok(func(conn)?))?)
    }
}

impl EventStore for SqliteStore {
    fn append(&self, event: NewEvent, ctx: &OpContext) -> Result<EventId, StoreError> {
        self.with_conn(ctx, |conn| {
            let tx = conn.transaction()?;
            let id = queries::insert_event(&tx, &event)?;
            ttlog(
                &tx,
                "scan",
                &event.employee_id,
                &format!("#{id} {} at {}", event.action, event.timestamp.to_rfc3339()),
            )?;

            // Dropping the transaction here rolls back both rows.
            ctx.check()?;
            tx.commit()?;
            Ok(id)
        })
    }

    fn list_by_employee(
        &self,
        employee_id: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        ctx: &OpContext,
    ) -> Result<Vec<AttendanceEvent>, StoreError> {
        self.with_conn(ctx, |conn| {
            Ok(queries::load_events_by_employee(
                conn,
                employee_id,
                from.as_ref(),
                to.as_ref(),
            )?)
        })
    }

    fn list_all(
        &self,
        from: Timestamp,
        to: Timestamp,
        ctx: &OpContext,
    ) -> Result<BTreeMap<String, Vec<AttendanceEvent>>, StoreError> {
        let events = self.with_conn(ctx, |conn| {
            Ok(queries::load_events_in_range(conn, &from, &to)?)
        })?;

        let mut out: BTreeMap<String, Vec<AttendanceEvent>> = BTreeMap::new();
        for ev in events {
            out.entry(ev.employee_id.clone()).or_default().push(ev);
        }
        Ok(out)
    }

    fn last_before(
        &self,
        employee_id: &str,
        before: Timestamp,
        ctx: &OpContext,
    ) -> Result<Option<AttendanceEvent>, StoreError> {
        self.with_conn(ctx, |conn| {
            Ok(queries::load_last_event_before(conn, employee_id, &before)?)
        })
    }
}

impl EmployeeDirectory for SqliteStore {
    fn resolve(&self, employee_id: &str, ctx: &OpContext) -> Result<Option<Employee>, StoreError> {
        self.with_conn(ctx, |conn| Ok(queries::load_employee(conn, employee_id)?))
    }

    fn list_employees(&self, ctx: &OpContext) -> Result<Vec<Employee>, StoreError> {
        self.with_conn(ctx, |conn| Ok(queries::load_employees(conn)?))
    }
}

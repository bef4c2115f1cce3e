use crate::errors::StoreError;
use crate::models::action::Action;
use crate::models::employee::Employee;
use crate::models::event::{AttendanceEvent, EventId, NewEvent};
use crate::models::location::GeoPoint;
use crate::utils::time::{Timestamp, from_millis, now};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const EVENT_COLUMNS: &str = "id, employee_id, action, ts_utc, latitude, longitude";

fn conversion_error(col: usize, ty: Type, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, ty, Box::new(StoreError::Corrupt(msg)))
}

pub fn map_event_row(row: &Row) -> Result<AttendanceEvent> {
    let action_str: String = row.get("action")?;
    let action = Action::from_db_str(&action_str)
        .ok_or_else(|| conversion_error(2, Type::Text, format!("invalid action: {action_str}")))?;

    let ts_ms: i64 = row.get("ts_utc")?;
    let timestamp = from_millis(ts_ms)
        .ok_or_else(|| conversion_error(3, Type::Integer, format!("invalid timestamp: {ts_ms}")))?;

    let location = GeoPoint::from_db(row.get("latitude")?, row.get("longitude")?);

    Ok(AttendanceEvent {
        event_id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        action,
        timestamp,
        location,
    })
}

pub fn map_employee_row(row: &Row) -> Result<Employee> {
    Ok(Employee {
        employee_id: row.get("employee_id")?,
        name: row.get("name")?,
        role: row.get("role")?,
    })
}

pub fn insert_event(conn: &Connection, ev: &NewEvent) -> Result<EventId> {
    conn.execute(
        "INSERT INTO events (employee_id, action, ts_utc, ts_local, latitude, longitude, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'scan', ?7)",
        params![
            ev.employee_id,
            ev.action.to_db_str(),
            ev.timestamp.timestamp_millis(),
            ev.timestamp.to_rfc3339(),
            ev.location.map(|l| l.latitude),
            ev.location.map(|l| l.longitude),
            now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn bounds(from: Option<&Timestamp>, to: Option<&Timestamp>) -> (i64, i64) {
    (
        from.map(|t| t.timestamp_millis()).unwrap_or(i64::MIN),
        to.map(|t| t.timestamp_millis()).unwrap_or(i64::MAX),
    )
}

/// Events of one employee in `[from, to)`, ordered by `(ts_utc, id)`.
pub fn load_events_by_employee(
    conn: &Connection,
    employee_id: &str,
    from: Option<&Timestamp>,
    to: Option<&Timestamp>,
) -> Result<Vec<AttendanceEvent>> {
    let (lo, hi) = bounds(from, to);
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE employee_id = ?1 AND ts_utc >= ?2 AND ts_utc < ?3
         ORDER BY ts_utc ASC, id ASC"
    ))?;

    let rows = stmt.query_map(params![employee_id, lo, hi], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every event in `[from, to)`, ordered by `(employee_id, ts_utc, id)`.
pub fn load_events_in_range(
    conn: &Connection,
    from: &Timestamp,
    to: &Timestamp,
) -> Result<Vec<AttendanceEvent>> {
    let (lo, hi) = bounds(Some(from), Some(to));
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE ts_utc >= ?1 AND ts_utc < ?2
         ORDER BY employee_id ASC, ts_utc ASC, id ASC"
    ))?;

    let rows = stmt.query_map(params![lo, hi], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_last_event_before(
    conn: &Connection,
    employee_id: &str,
    before: &Timestamp,
) -> Result<Option<AttendanceEvent>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE employee_id = ?1 AND ts_utc < ?2
         ORDER BY ts_utc DESC, id DESC
         LIMIT 1"
    ))?;

    stmt.query_row(params![employee_id, before.timestamp_millis()], map_event_row)
        .optional()
}

pub fn load_event(conn: &Connection, id: EventId) -> Result<Option<AttendanceEvent>> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))?;
    stmt.query_row([id], map_event_row).optional()
}

pub fn insert_employee(conn: &Connection, e: &Employee) -> Result<()> {
    conn.execute(
        "INSERT INTO employees (employee_id, name, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![e.employee_id, e.name, e.role, now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn load_employee(conn: &Connection, employee_id: &str) -> Result<Option<Employee>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id, name, role FROM employees WHERE employee_id = ?1",
    )?;
    stmt.query_row([employee_id], map_employee_row).optional()
}

pub fn load_employees(conn: &Connection) -> Result<Vec<Employee>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id, name, role FROM employees ORDER BY name ASC, employee_id ASC",
    )?;
    let rows = stmt.query_map([], map_employee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

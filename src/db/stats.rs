use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::{format_detail, from_millis};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Summary figures about a database file.
#[derive(Debug, Clone, Default)]
pub struct DbInfo {
    pub file_size: u64,
    pub employees: i64,
    pub events: i64,
    pub first_event_ms: Option<i64>,
    pub last_event_ms: Option<i64>,
}

pub fn collect_db_info(conn: &Connection, db_path: &str) -> rusqlite::Result<DbInfo> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let employees: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
    let events: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;

    let (first_event_ms, last_event_ms): (Option<i64>, Option<i64>) = conn
        .query_row("SELECT MIN(ts_utc), MAX(ts_utc) FROM events", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?
        .unwrap_or((None, None));

    Ok(DbInfo {
        file_size,
        employees,
        events,
        first_event_ms,
        last_event_ms,
    })
}

pub fn print_db_info(info: &DbInfo, db_path: &str) {
    println!();

    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Employees:{} {}{}{}",
        CYAN, RESET, GREEN, info.employees, RESET
    );
    println!(
        "{}• Total events:{} {}{}{}",
        CYAN, RESET, GREEN, info.events, RESET
    );

    let fmt = |ms: Option<i64>| {
        ms.and_then(from_millis)
            .map(|ts| format_detail(&ts))
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Event range:{}", CYAN, RESET);
    println!("    from: {}", fmt(info.first_event_ms));
    println!("    to:   {}", fmt(info.last_event_ms));

    if let (Some(f), Some(l)) = (info.first_event_ms, info.last_event_ms) {
        let days = ((l - f) / 86_400_000).max(1);
        let avg = info.events as f64 / days as f64;
        println!("{}• Average events/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
}

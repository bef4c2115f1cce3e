use crate::db::log::LogEntry;
use crate::utils::colors::{BLUE, CYAN, GREEN, MAGENTA, RESET, WHITE, YELLOW};
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 60;

/// ANSI color for an audit operation
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "scan" => GREEN,
        "employee_add" => CYAN,
        "migration_applied" => MAGENTA,
        "init" => YELLOW,
        "vacuum" | "check" => BLUE,
        _ => WHITE,
    }
}

/// Cut `s` to `max` display columns, ending with `...` when shortened.
fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if UnicodeWidthStr::width(out.as_str()) + 3 >= max {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(entries: &[LogEntry]) {
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return;
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        let rows: Vec<(i64, String, &str, String, &str)> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());

                let rest = if e.target.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", e.target)
                };
                let visible = truncate(&format!("{}{rest}", e.operation), MAX_OP_WIDTH);

                (e.id, date, e.operation.as_str(), visible, e.message.as_str())
            })
            .collect();

        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| UnicodeWidthStr::width(r.3.as_str()))
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, op, visible, message) in rows {
            // only the operation word is colored; padding is computed on visible text
            let padding = " ".repeat(op_w.saturating_sub(UnicodeWidthStr::width(visible.as_str())));
            let colored = match visible.strip_prefix(op) {
                Some(rest) => format!("{}{op}{RESET}{rest}", color_for_operation(op)),
                None => visible.clone(),
            };

            println!("{id:>id_w$}: {date:<date_w$} | {colored}{padding} => {message}");
        }
    }
}

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Anomaly count color:
/// 0 → reset
/// \>0 → yellow
pub fn color_for_anomalies(count: usize) -> &'static str {
    if count > 0 { YELLOW } else { RESET }
}

/// entrada green, salida red.
pub fn colorize_action(value: &str, is_entrada: bool) -> String {
    if is_entrada {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

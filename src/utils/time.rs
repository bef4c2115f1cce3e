//! Time utilities: the reference zone, instant parsing, formatting and rounding of durations.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Every stored timestamp and every report boundary lives in this zone.
pub const REFERENCE_TZ: Tz = chrono_tz::America::Mexico_City;

/// An instant expressed in the reference zone.
pub type Timestamp = DateTime<Tz>;

/// Format used by detail listings.
pub const DETAIL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a string carrying an explicit offset (RFC 3339, or `YYYY-MM-DD HH:MM:SS±HH:MM`)
/// into an instant in the reference zone. Strings without an offset are not absolute
/// instants and are rejected.
pub fn parse_instant(s: &str) -> Option<Timestamp> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&REFERENCE_TZ));
    }

    let with_offset = ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M%:z"];
    with_offset
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.with_timezone(&REFERENCE_TZ))
}

/// Interpret a wall-clock reading in the reference zone.
/// Times skipped by a DST jump yield `None`; repeated times resolve to the earlier instant.
pub fn localize(naive: NaiveDateTime) -> Option<Timestamp> {
    match REFERENCE_TZ.from_local_datetime(&naive) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Midnight at the start of `date` in the reference zone.
pub fn start_of_day(date: NaiveDate) -> Option<Timestamp> {
    date.and_hms_opt(0, 0, 0).and_then(localize)
}

pub fn now() -> Timestamp {
    Utc::now().with_timezone(&REFERENCE_TZ)
}

/// Unix milliseconds → instant in the reference zone.
pub fn from_millis(ms: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&REFERENCE_TZ))
}

pub fn format_detail(ts: &Timestamp) -> String {
    ts.format(DETAIL_FORMAT).to_string()
}

/// Milliseconds → hundredths of an hour, rounding half up.
pub fn hundredths_of_hour(millis: i64) -> i64 {
    let millis = millis.max(0);
    (millis * 100 + 1_800_000) / 3_600_000
}

/// Render hundredths of an hour as `H.HH`.
pub fn format_hours(hundredths: i64) -> String {
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

//! Reporting windows: half-open `[start, end)` spans of reference-zone instants.

use crate::errors::{AppError, AppResult};
use crate::utils::time::{Timestamp, now, start_of_day};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl ReportWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::InvalidWindow(format!(
                "start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole days `first..=last`, midnight to midnight in the reference zone.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> AppResult<Self> {
        let after_last = last
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::InvalidDate(last.to_string()))?;
        Self::new(midnight(first)?, midnight(after_last)?)
    }

    /// The seven-day week containing `date`, beginning on `week_start`.
    pub fn week_of(date: NaiveDate, week_start: Weekday) -> AppResult<Self> {
        let back = (7 + date.weekday().num_days_from_monday()
            - week_start.num_days_from_monday())
            % 7;
        let first = date
            .checked_sub_days(Days::new(u64::from(back)))
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        let last = first
            .checked_add_days(Days::new(6))
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        Self::from_dates(first, last)
    }

    /// The weekly cut for today.
    pub fn current_week(week_start: Weekday) -> AppResult<Self> {
        Self::week_of(now().date_naive(), week_start)
    }

    /// `YYYY-Www` (ISO 8601 week, Monday to Sunday).
    pub fn parse_iso_week(s: &str) -> AppResult<Self> {
        let bad = || AppError::InvalidDate(format!("{s} (expected YYYY-Www)"));

        let (year, week) = s.trim().split_once("-W").ok_or_else(bad)?;
        let year: i32 = year.parse().map_err(|_| bad())?;
        let week: u32 = week.parse().map_err(|_| bad())?;

        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(bad)?;
        Self::week_of(monday, Weekday::Mon)
    }

    /// Any expression accepted by [`parse_range`].
    pub fn parse_range(s: &str) -> AppResult<Self> {
        let (first, last) = parse_range(s)?;
        if first > last {
            return Err(AppError::InvalidWindow(format!("{s}: start after end")));
        }
        Self::from_dates(first, last)
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        *ts >= self.start && *ts < self.end
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

fn midnight(d: NaiveDate) -> AppResult<Timestamp> {
    start_of_day(d).ok_or_else(|| AppError::InvalidDate(format!("{d} has no midnight")))
}

/// Parse a date range expression into inclusive first/last days.
///
/// Accepted:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any of the above as `A:B`, both sides in the same format
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{r}: start and end must have same format"
            )));
        }

        let (first, _) = parse_period(start)?;
        let (_, last) = parse_period(end)?;
        Ok((first, last))
    } else {
        parse_period(r)
    }
}

/// First and last day of a single year, month or day.
fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = |what: &str| AppError::InvalidDate(format!("{p}: invalid {what}"));

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid("year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("year"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid("month"))?;
            let d2 = month_last_day(d1).ok_or_else(|| invalid("month"))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid("date"))?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!(
            "{p}: unsupported range format (YYYY, YYYY-MM, YYYY-MM-DD or A:B)"
        ))),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(chrono::Months::new(1))?.pred_opt()
}

use rattendance::core::window::{ReportWindow, parse_range};
use rattendance::errors::AppError;
use chrono::{NaiveDate, Weekday};

mod common;
use common::ts;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn week_of_starts_on_configured_day() {
    let w = ReportWindow::week_of(d(2025, 1, 8), Weekday::Mon).unwrap();
    assert_eq!(w.start, ts("2025-01-06T00:00:00-06:00"));
    assert_eq!(w.end, ts("2025-01-13T00:00:00-06:00"));

    let w = ReportWindow::week_of(d(2025, 1, 8), Weekday::Sun).unwrap();
    assert_eq!(w.start, ts("2025-01-05T00:00:00-06:00"));

    // the start day itself belongs to its own week
    let w = ReportWindow::week_of(d(2025, 1, 6), Weekday::Mon).unwrap();
    assert_eq!(w.start, ts("2025-01-06T00:00:00-06:00"));
}

#[test]
fn iso_week_parsing() {
    let w = ReportWindow::parse_iso_week("2025-W02").unwrap();
    assert_eq!(w.start, ts("2025-01-06T00:00:00-06:00"));
    assert_eq!(w.end, ts("2025-01-13T00:00:00-06:00"));

    for bad in ["2025-02", "2025-W54", "2025W02", "W02"] {
        assert!(
            matches!(ReportWindow::parse_iso_week(bad), Err(AppError::InvalidDate(_))),
            "{bad}"
        );
    }
}

#[test]
fn range_expressions() {
    assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
    assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(parse_range("2025-02").unwrap(), (d(2025, 2, 1), d(2025, 2, 28)));
    assert_eq!(parse_range("2025-01-06").unwrap(), (d(2025, 1, 6), d(2025, 1, 6)));
    assert_eq!(
        parse_range("2025-01:2025-03").unwrap(),
        (d(2025, 1, 1), d(2025, 3, 31))
    );
    assert_eq!(
        parse_range("2025-01-06:2025-01-10").unwrap(),
        (d(2025, 1, 6), d(2025, 1, 10))
    );

    assert!(parse_range("2025-01:2025-01-10").is_err());
    assert!(parse_range("2025-13").is_err());
    assert!(parse_range("yesterday").is_err());
}

#[test]
fn range_window_covers_whole_days() {
    let w = ReportWindow::parse_range("2025-01-06:2025-01-07").unwrap();
    assert_eq!(w.start, ts("2025-01-06T00:00:00-06:00"));
    assert_eq!(w.end, ts("2025-01-08T00:00:00-06:00"));
    assert!(w.contains(&ts("2025-01-07T23:59:59-06:00")));
    assert!(!w.contains(&ts("2025-01-08T00:00:00-06:00")));
}

#[test]
fn inverted_windows_are_rejected() {
    assert!(matches!(
        ReportWindow::parse_range("2025-02:2025-01"),
        Err(AppError::InvalidWindow(_))
    ));
    let t = ts("2025-01-06T00:00:00-06:00");
    assert!(matches!(ReportWindow::new(t, t), Err(AppError::InvalidWindow(_))));
}

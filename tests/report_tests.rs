use rattendance::core::report::{detail_rows, render_location, summary_rows};
use rattendance::core::service::{AttendanceService, ServiceOptions};
use rattendance::errors::AppError;
use rattendance::models::action::Action::{Entrada, Salida};
use rattendance::models::employee::Employee;
use rattendance::models::location::GeoPoint;
use rattendance::models::raw_scan::RawScan;
use rattendance::models::weekly_total::{AnomalyCounts, WeeklyTotal};
use rattendance::store::CancelToken;

mod common;
use common::{event, located, memory, mon, ts};

#[test]
fn detail_rows_format_timestamp_action_and_location() {
    let emp = Employee::new("E001", "Ana Torres", "Guardia");
    let events = vec![
        located(event(1, "E001", Entrada, mon("09:00")), 19.4326, -99.1332),
        event(2, "E001", Salida, mon("17:30")),
    ];

    let rows = detail_rows(&emp, &events, "unavailable");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].timestamp, "2025-01-06 09:00:00");
    assert_eq!(rows[0].action, "entrada");
    assert_eq!(rows[0].location, "19.4326, -99.1332");
    assert_eq!(rows[0].role, "Guardia");
    assert_eq!(rows[1].action, "salida");
    assert_eq!(rows[1].location, "unavailable");
}

#[test]
fn location_marker_is_configurable() {
    assert_eq!(render_location(None, "sin ubicación"), "sin ubicación");
    let p = GeoPoint::new(-33.5, 151.0).unwrap();
    assert_eq!(render_location(Some(&p), "x"), "-33.5, 151");
}

#[test]
fn summary_rows_keep_order_and_values() {
    let totals = vec![
        WeeklyTotal {
            employee_id: "E001".into(),
            name: "Ana Torres".into(),
            worked_millis: 30_600_000,
            total_hundredths: 850,
            completed_intervals: 1,
            anomalies: AnomalyCounts::default(),
        },
        WeeklyTotal {
            employee_id: "E002".into(),
            name: "Bruno Díaz".into(),
            worked_millis: 28_500_000,
            total_hundredths: 792,
            completed_intervals: 1,
            anomalies: AnomalyCounts {
                open: 1,
                dangling: 0,
                invalid: 0,
            },
        },
    ];

    let rows = summary_rows(&totals);
    assert_eq!(rows[0].total_hours, "8.50");
    assert_eq!(rows[1].total_hours, "7.92");
    assert_eq!(rows[1].anomalies, 1);
    assert_eq!(rows[1].open, 1);
}

#[test]
fn scan_without_location_renders_unavailable() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let cancel = CancelToken::new();

    svc.submit_event(
        &RawScan::new("E002", "entrada", "2025-01-06T15:00:00Z", None),
        &cancel,
    )
    .unwrap();

    let detail = svc.get_employee_detail("E002", None, None, &cancel).unwrap();
    assert_eq!(detail.employee.name, "Bruno Díaz");
    assert_eq!(detail.rows.len(), 1);
    assert_eq!(detail.rows[0].timestamp, "2025-01-06 09:00:00");
    assert_eq!(detail.rows[0].location, "unavailable");
}

#[test]
fn detail_is_ordered_and_bounded() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let cancel = CancelToken::new();

    for at in [
        "2025-01-07T17:00:00-06:00",
        "2025-01-06T09:00:00-06:00",
        "2025-01-08T09:00:00-06:00",
        "2025-01-07T09:00:00-06:00",
    ] {
        svc.submit_event(&RawScan::new("E001", "entrada", at, None), &cancel)
            .unwrap();
    }

    let all = svc.get_employee_detail("E001", None, None, &cancel).unwrap();
    let stamps: Vec<_> = all.rows.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        stamps,
        vec![
            "2025-01-06 09:00:00",
            "2025-01-07 09:00:00",
            "2025-01-07 17:00:00",
            "2025-01-08 09:00:00"
        ]
    );

    let day = svc
        .get_employee_detail(
            "E001",
            Some(ts("2025-01-07T00:00:00-06:00")),
            Some(ts("2025-01-08T00:00:00-06:00")),
            &cancel,
        )
        .unwrap();
    assert_eq!(day.rows.len(), 2);
}

#[test]
fn detail_for_unknown_employee_fails() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let err = svc
        .get_employee_detail("NOPE", None, None, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownEmployee(id) if id == "NOPE"));
}

#[test]
fn detail_rejects_inverted_bounds() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let err = svc
        .get_employee_detail("E001", Some(mon("10:00")), Some(mon("09:00")), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidWindow(_)));
}

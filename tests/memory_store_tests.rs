use rattendance::core::service::{AttendanceService, ServiceOptions};
use rattendance::errors::{AppError, CancelReason, Field, StoreError};
use rattendance::models::action::Action::{Entrada, Salida};
use rattendance::models::event::NewEvent;
use rattendance::models::raw_scan::RawScan;
use rattendance::store::{CancelToken, EventStore, MemoryStore, OpContext};
use std::thread;
use std::time::Duration;

mod common;
use common::{memory, mon, ts};

fn new_event(employee: &str, action: rattendance::models::action::Action, at: &str) -> NewEvent {
    NewEvent {
        employee_id: employee.into(),
        action,
        timestamp: ts(at),
        location: None,
    }
}

#[test]
fn ids_are_unique_and_increasing() {
    let store = MemoryStore::new();
    let ctx = OpContext::unbounded();
    let a = store.append(new_event("E001", Entrada, "2025-01-06T09:00:00-06:00"), &ctx).unwrap();
    let b = store.append(new_event("E002", Entrada, "2025-01-06T08:00:00-06:00"), &ctx).unwrap();
    let c = store.append(new_event("E001", Salida, "2025-01-06T17:00:00-06:00"), &ctx).unwrap();
    assert!(a < b && b < c);
    assert_eq!(store.len(), 3);
}

#[test]
fn listing_is_ordered_by_timestamp_then_id() {
    let store = MemoryStore::new();
    let ctx = OpContext::unbounded();
    store.append(new_event("E001", Salida, "2025-01-06T17:00:00-06:00"), &ctx).unwrap();
    let same_a = store.append(new_event("E001", Entrada, "2025-01-06T09:00:00-06:00"), &ctx).unwrap();
    let same_b = store.append(new_event("E001", Salida, "2025-01-06T09:00:00-06:00"), &ctx).unwrap();

    let events = store.list_by_employee("E001", None, None, &ctx).unwrap();
    let ids: Vec<_> = events.iter().map(|e| e.event_id).collect();
    assert_eq!(ids, vec![same_a, same_b, 1]);
}

#[test]
fn list_all_groups_by_employee_and_skips_empty() {
    let store = MemoryStore::new();
    let ctx = OpContext::unbounded();
    store.append(new_event("E001", Entrada, "2025-01-06T09:00:00-06:00"), &ctx).unwrap();
    store.append(new_event("E002", Entrada, "2025-01-20T09:00:00-06:00"), &ctx).unwrap();

    let map = store
        .list_all(mon("00:00"), ts("2025-01-13T00:00:00-06:00"), &ctx)
        .unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["E001"]);
}

#[test]
fn last_before_is_strict() {
    let store = MemoryStore::new();
    let ctx = OpContext::unbounded();
    store.append(new_event("E001", Entrada, "2025-01-05T22:00:00-06:00"), &ctx).unwrap();
    store.append(new_event("E001", Salida, "2025-01-06T00:00:00-06:00"), &ctx).unwrap();

    let prev = store.last_before("E001", mon("00:00"), &ctx).unwrap().unwrap();
    assert_eq!(prev.action, Entrada);
    assert!(store.last_before("E002", mon("00:00"), &ctx).unwrap().is_none());
}

#[test]
fn rejected_scan_leaves_store_unchanged() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());

    let err = svc
        .submit_event(
            &RawScan::new("E001", "lunch", "2025-01-06T12:00:00-06:00", None),
            &CancelToken::new(),
        )
        .unwrap_err();

    match err {
        AppError::Validation(e) => assert_eq!(e.field, Field::Action),
        other => panic!("unexpected {other:?}"),
    }
    assert!(svc.store().is_empty());
}

#[test]
fn cancelled_append_writes_nothing() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = svc
        .submit_event(
            &RawScan::new("E001", "entrada", "2025-01-06T09:00:00-06:00", None),
            &cancel,
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Cancelled(CancelReason::Requested)));
    assert!(err.is_retryable());
    assert!(svc.store().is_empty());
}

#[test]
fn expired_deadline_is_reported_as_timeout() {
    let store = MemoryStore::new();
    let ctx = OpContext::new(CancelToken::new(), Some(Duration::ZERO));
    let err = store
        .append(new_event("E001", Entrada, "2025-01-06T09:00:00-06:00"), &ctx)
        .unwrap_err();
    assert!(matches!(err, StoreError::Cancelled(CancelReason::TimedOut)));
    assert!(store.is_empty());
}

#[test]
fn concurrent_appends_across_employees() {
    let store = MemoryStore::new();
    let employees: Vec<String> = (0..8).map(|n| format!("E{n:03}")).collect();

    thread::scope(|s| {
        for emp in &employees {
            let store = &store;
            s.spawn(move || {
                let ctx = OpContext::unbounded();
                for i in 0..50 {
                    let action = if i % 2 == 0 { Entrada } else { Salida };
                    let at = format!("2025-01-06T{:02}:{:02}:00-06:00", 6 + i / 10, (i % 10) * 5);
                    store.append(new_event(emp, action, &at), &ctx).unwrap();
                }
            });
        }
    });

    assert_eq!(store.len(), 8 * 50);

    let ctx = OpContext::unbounded();
    let mut all_ids = Vec::new();
    for emp in &employees {
        let events = store.list_by_employee(emp, None, None, &ctx).unwrap();
        assert_eq!(events.len(), 50);
        // submission order per employee equals id order
        assert!(events.windows(2).all(|w| w[0].event_id < w[1].event_id));
        all_ids.extend(events.iter().map(|e| e.event_id));
    }
    all_ids.sort();
    all_ids.dedup();
    assert_eq!(all_ids.len(), 8 * 50);
}

#[test]
fn reports_run_while_scans_arrive() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let window = rattendance::core::window::ReportWindow::parse_iso_week("2025-W02").unwrap();

    thread::scope(|s| {
        let svc = &svc;
        s.spawn(move || {
            for day in 6..=10 {
                for (action, hh) in [("entrada", 9), ("salida", 17)] {
                    let at = format!("2025-01-{day:02}T{hh:02}:00:00-06:00");
                    svc.submit_event(&RawScan::new("E001", action, &at, None), &CancelToken::new())
                        .unwrap();
                }
            }
        });
        s.spawn(move || {
            for _ in 0..20 {
                let totals = svc.get_weekly_report(&window, None, &CancelToken::new()).unwrap();
                // a snapshot may be partial but never negative or inconsistent
                for t in totals {
                    assert!(t.worked_millis >= 0);
                    assert!(t.total_hundredths <= 40 * 100);
                }
            }
        });
    });

    let totals = svc.get_weekly_report(&window, None, &CancelToken::new()).unwrap();
    assert_eq!(totals[0].total_hours_str(), "40.00");
    assert_eq!(totals[0].anomaly_count(), 0);
}

#[test]
fn scanner_json_is_submitted() {
    let (store, dir) = memory();
    let svc = AttendanceService::new(store, dir, ServiceOptions::default());
    let cancel = CancelToken::new();

    let id = svc
        .submit_json(
            r#"{"id_unico": 7, "entrada_sali": "entrada", "timestamp": "2025-01-06T09:00:00-06:00"}"#,
            &cancel,
        )
        .unwrap_err();
    // numeric ids are read as text, and "7" is not in the directory
    assert!(matches!(id, AppError::Validation(e) if e.field == Field::EmployeeId));

    let id = svc
        .submit_json(
            r#"{"id_unico": "E003", "entrada_sali": "salida", "timestamp": "2025-01-06T14:00:00-06:00", "location": null}"#,
            &cancel,
        )
        .unwrap();
    let stored = svc
        .store()
        .list_by_employee("E003", None, None, &OpContext::unbounded())
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].event_id, id);
    assert!(stored[0].location.is_none());

    let err = svc.submit_json("{\"id_unico\": ", &cancel).unwrap_err();
    assert!(matches!(err, AppError::Validation(e) if e.field == Field::Payload));
}

use rattendance::core::reconstructor::build_timeline;
use rattendance::models::action::Action::{Entrada, Salida};
use rattendance::models::interval::IntervalStatus;
use chrono::Duration;

mod common;
use common::{event, mon};

#[test]
fn empty_input_gives_empty_timeline() {
    let t = build_timeline(&[]);
    assert!(t.events.is_empty());
    assert!(t.intervals.is_empty());
}

#[test]
fn entrada_salida_pair_is_completed() {
    let events = vec![
        event(1, "E001", Entrada, mon("09:00")),
        event(2, "E001", Salida, mon("17:30")),
    ];
    let t = build_timeline(&events);

    assert_eq!(t.intervals.len(), 1);
    let i = &t.intervals[0];
    assert_eq!(i.status, IntervalStatus::Completed);
    assert_eq!(i.duration(), Some(Duration::minutes(510)));
    assert_eq!((i.start_event, i.end_event), (Some(1), Some(2)));
}

#[test]
fn duplicate_entrada_keeps_first_as_open() {
    let events = vec![
        event(1, "E001", Entrada, mon("09:00")),
        event(2, "E001", Entrada, mon("09:05")),
        event(3, "E001", Salida, mon("17:00")),
    ];
    let t = build_timeline(&events);

    let statuses: Vec<_> = t.intervals.iter().map(|i| i.status).collect();
    assert_eq!(statuses, vec![IntervalStatus::Open, IntervalStatus::Completed]);

    assert_eq!(t.intervals[0].start, Some(mon("09:00")));
    assert_eq!(t.intervals[0].end, None);
    assert_eq!(t.intervals[0].duration(), None);
    assert_eq!(t.intervals[1].duration(), Some(Duration::minutes(475)));
}

#[test]
fn orphan_salida_is_dangling() {
    let events = vec![
        event(1, "E001", Salida, mon("08:00")),
        event(2, "E001", Entrada, mon("09:00")),
        event(3, "E001", Salida, mon("13:00")),
        event(4, "E001", Salida, mon("13:01")),
    ];
    let t = build_timeline(&events);

    let statuses: Vec<_> = t.intervals.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![
            IntervalStatus::Dangling,
            IntervalStatus::Completed,
            IntervalStatus::Dangling
        ]
    );
    assert_eq!(t.intervals[0].start, None);
    assert_eq!(t.intervals[0].end, Some(mon("08:00")));
}

#[test]
fn trailing_entrada_is_open() {
    let events = vec![event(1, "E001", Entrada, mon("09:00"))];
    let t = build_timeline(&events);
    assert_eq!(t.intervals.len(), 1);
    assert_eq!(t.intervals[0].status, IntervalStatus::Open);
    assert_eq!(t.completed().count(), 0);
    assert_eq!(t.anomalies().count(), 1);
}

#[test]
fn every_event_lands_in_exactly_one_interval() {
    let events = vec![
        event(1, "E001", Salida, mon("07:00")),
        event(2, "E001", Entrada, mon("08:00")),
        event(3, "E001", Entrada, mon("08:30")),
        event(4, "E001", Salida, mon("12:00")),
        event(5, "E001", Entrada, mon("13:00")),
        event(6, "E001", Salida, mon("17:00")),
        event(7, "E001", Entrada, mon("18:00")),
    ];
    let t = build_timeline(&events);

    let mut referenced: Vec<i64> = t
        .intervals
        .iter()
        .flat_map(|i| [i.start_event, i.end_event])
        .flatten()
        .collect();
    referenced.sort();
    assert_eq!(referenced, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn alternating_sequence_sums_each_pair() {
    let shifts = [("06:00", "10:15"), ("11:00", "14:40"), ("15:10", "19:55")];
    let mut events = Vec::new();
    let mut expected = Duration::zero();
    for (n, (a, b)) in shifts.iter().enumerate() {
        let id = (n as i64) * 2;
        events.push(event(id + 1, "E001", Entrada, mon(a)));
        events.push(event(id + 2, "E001", Salida, mon(b)));
        expected += mon(b) - mon(a);
    }

    let t = build_timeline(&events);
    let total: Duration = t.completed().filter_map(|i| i.duration()).sum();
    assert_eq!(total, expected);
    assert_eq!(t.anomalies().count(), 0);
}

#[test]
fn input_order_does_not_matter() {
    let ordered = vec![
        event(1, "E001", Entrada, mon("09:00")),
        event(2, "E001", Salida, mon("12:00")),
        event(3, "E001", Entrada, mon("13:00")),
        event(4, "E001", Salida, mon("18:00")),
    ];
    let mut shuffled = ordered.clone();
    shuffled.reverse();
    shuffled.swap(0, 2);

    let a = build_timeline(&ordered);
    let b = build_timeline(&shuffled);
    assert_eq!(a.intervals, b.intervals);
    assert_eq!(a.events, b.events);
}

#[test]
fn same_timestamp_ties_break_on_event_id() {
    // entrada and salida share an instant; id order decides pairing
    let events = vec![
        event(8, "E001", Salida, mon("09:00")),
        event(7, "E001", Entrada, mon("09:00")),
    ];
    let t = build_timeline(&events);

    assert_eq!(t.events[0].event_id, 7);
    assert_eq!(t.intervals.len(), 1);
    assert_eq!(t.intervals[0].status, IntervalStatus::Completed);
    assert_eq!(t.intervals[0].duration(), Some(Duration::zero()));
}

//! Tests for per-participant normalization (group, clip, sort, merge).

use availability_engine::normalizer::{normalize, normalize_all};
use availability_engine::{BusyInterval, Interval};
use chrono::{DateTime, TimeZone, Utc};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn busy(id: &str, start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    BusyInterval::new(id, at(start.0, start.1), at(end.0, end.1))
}

fn day() -> (DateTime<Utc>, DateTime<Utc>) {
    (at(0, 0), Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap())
}

#[test]
fn unsorted_overlapping_intervals_are_merged() {
    let (ws, we) = day();
    let input = vec![
        busy("p1", (14, 0), (15, 0)),
        busy("p1", (9, 0), (10, 30)),
        busy("p1", (10, 0), (11, 0)),
    ];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].participant_id, "p1");
    assert_eq!(
        schedules[0].intervals,
        vec![
            Interval::new(at(9, 0), at(11, 0)),
            Interval::new(at(14, 0), at(15, 0)),
        ]
    );
}

#[test]
fn adjacent_intervals_are_merged() {
    // 09:00-10:00 and 10:00-11:00 touch with zero gap.
    let (ws, we) = day();
    let input = vec![busy("p1", (9, 0), (10, 0)), busy("p1", (10, 0), (11, 0))];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules[0].intervals, vec![Interval::new(at(9, 0), at(11, 0))]);
}

#[test]
fn duplicate_intervals_collapse() {
    let (ws, we) = day();
    let input = vec![busy("p1", (9, 0), (10, 0)), busy("p1", (9, 0), (10, 0))];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules[0].intervals, vec![Interval::new(at(9, 0), at(10, 0))]);
}

#[test]
fn contained_interval_is_absorbed() {
    let (ws, we) = day();
    let input = vec![busy("p1", (9, 0), (12, 0)), busy("p1", (10, 0), (11, 0))];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules[0].intervals, vec![Interval::new(at(9, 0), at(12, 0))]);
}

#[test]
fn zero_length_intervals_are_dropped() {
    let (ws, we) = day();
    let input = vec![busy("p1", (9, 0), (9, 0)), busy("p1", (13, 0), (14, 0))];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules[0].intervals, vec![Interval::new(at(13, 0), at(14, 0))]);
}

#[test]
fn partially_overlapping_interval_is_truncated() {
    // Window 08:00-17:00, interval 07:00-09:00 → clipped to 08:00-09:00.
    let input = vec![busy("p1", (7, 0), (9, 0)), busy("p1", (16, 0), (18, 0))];

    let schedules = normalize(&input, at(8, 0), at(17, 0));

    assert_eq!(
        schedules[0].intervals,
        vec![
            Interval::new(at(8, 0), at(9, 0)),
            Interval::new(at(16, 0), at(17, 0)),
        ]
    );
}

#[test]
fn interval_outside_window_is_discarded() {
    let input = vec![busy("p1", (6, 0), (7, 0)), busy("p1", (17, 0), (18, 0))];

    let schedules = normalize(&input, at(8, 0), at(17, 0));

    assert_eq!(schedules.len(), 1);
    assert!(schedules[0].intervals.is_empty());
}

#[test]
fn participants_are_grouped_and_ordered_by_id() {
    let (ws, we) = day();
    let input = vec![
        busy("zoe", (9, 0), (10, 0)),
        busy("amy", (11, 0), (12, 0)),
        busy("zoe", (9, 30), (10, 30)),
    ];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0].participant_id, "amy");
    assert_eq!(schedules[0].intervals, vec![Interval::new(at(11, 0), at(12, 0))]);
    assert_eq!(schedules[1].participant_id, "zoe");
    assert_eq!(schedules[1].intervals, vec![Interval::new(at(9, 0), at(10, 30))]);
}

#[test]
fn intervals_of_one_participant_do_not_merge_with_another() {
    let (ws, we) = day();
    let input = vec![busy("a", (9, 0), (10, 0)), busy("b", (10, 0), (11, 0))];

    let schedules = normalize(&input, ws, we);

    assert_eq!(schedules[0].intervals, vec![Interval::new(at(9, 0), at(10, 0))]);
    assert_eq!(schedules[1].intervals, vec![Interval::new(at(10, 0), at(11, 0))]);
}

#[test]
fn normalizing_twice_is_idempotent() {
    let (ws, we) = day();
    let input = vec![
        busy("p1", (9, 0), (10, 0)),
        busy("p1", (9, 30), (11, 0)),
        busy("p2", (13, 0), (14, 0)),
        busy("p2", (14, 0), (14, 30)),
    ];

    let once = normalize(&input, ws, we);
    let flattened: Vec<BusyInterval> = once.iter().flat_map(|s| s.to_busy_intervals()).collect();
    let twice = normalize(&flattened, ws, we);

    assert_eq!(once, twice);
}

#[test]
fn normalize_all_fills_in_empty_schedules_and_drops_strangers() {
    let (ws, we) = day();
    let ids = vec!["a".to_string(), "b".to_string()];
    let input = vec![busy("a", (9, 0), (10, 0)), busy("stranger", (9, 0), (10, 0))];

    let schedules = normalize_all(&ids, &input, ws, we);

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0].participant_id, "a");
    assert_eq!(schedules[0].intervals.len(), 1);
    assert_eq!(schedules[1].participant_id, "b");
    assert!(schedules[1].intervals.is_empty());
}

#[test]
fn empty_input_produces_no_schedules() {
    let (ws, we) = day();
    assert!(normalize(&[], ws, we).is_empty());
}

//! Tests for `AvailabilityQuery` construction and validation.

use availability_engine::{AvailabilityQuery, EngineError};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn assert_invalid(result: Result<AvailabilityQuery, EngineError>) {
    match result {
        Err(EngineError::InvalidQuery(_)) => {}
        other => panic!("expected InvalidQuery, got {:?}", other),
    }
}

#[test]
fn valid_query_exposes_its_fields() {
    let q = AvailabilityQuery::new(["b", "a", "b"], at(8, 0), at(18, 0), 45).unwrap();

    let ids: Vec<&str> = q.participant_ids().iter().map(String::as_str).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(q.range_start(), at(8, 0));
    assert_eq!(q.range_end(), at(18, 0));
    assert_eq!(q.min_duration_minutes(), 45);
    assert_eq!(q.min_duration(), Duration::minutes(45));
}

#[test]
fn one_minute_is_the_smallest_duration() {
    let q = AvailabilityQuery::new(["a"], at(8, 0), at(8, 1), 1).unwrap();
    assert_eq!(q.min_duration(), Duration::minutes(1));
}

#[test]
fn zero_minute_duration_is_rejected() {
    assert_invalid(AvailabilityQuery::new(["a"], at(8, 0), at(18, 0), 0));
}

#[test]
fn negative_duration_is_rejected() {
    assert_invalid(AvailabilityQuery::new(["a"], at(8, 0), at(18, 0), -5));
}

#[test]
fn unrepresentable_duration_is_rejected() {
    assert_invalid(AvailabilityQuery::new(["a"], at(8, 0), at(18, 0), i64::MAX));
    assert_invalid(AvailabilityQuery::new(
        ["a"],
        at(8, 0),
        at(18, 0),
        200_000_000_000_000,
    ));
}

#[test]
fn empty_participant_set_is_rejected() {
    let none: [&str; 0] = [];
    assert_invalid(AvailabilityQuery::new(none, at(8, 0), at(18, 0), 30));
}

#[test]
fn empty_range_is_rejected() {
    assert_invalid(AvailabilityQuery::new(["a"], at(8, 0), at(8, 0), 30));
}

#[test]
fn inverted_range_is_rejected() {
    assert_invalid(AvailabilityQuery::new(["a"], at(18, 0), at(8, 0), 30));
}

//! End-to-end pipelines over busy intervals.
//!
//! Compose the normalizer with either the sweep and ranker (suggested times) or
//! the reporter (circle availability). Pure functions of their inputs.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::intersect::intersect;
use crate::normalizer::{normalize, normalize_all};
use crate::ranker::{rank_with_policy, WindowPolicy};
use crate::report::report;
use crate::types::{AvailabilityQuery, BusyInterval, FreeSegment, MemberAvailability, TimeSlot};

/// Normalize and sweep `busy` for the query, returning the free-segment partition.
pub fn free_segments(query: &AvailabilityQuery, busy: &[BusyInterval]) -> Vec<FreeSegment> {
    let schedules = normalize(busy, query.range_start(), query.range_end());
    intersect(query, &schedules)
}

/// Compute at most `limit` suggested times for the query.
pub fn suggest_times(
    query: &AvailabilityQuery,
    busy: &[BusyInterval],
    limit: usize,
    policy: WindowPolicy,
) -> Vec<TimeSlot> {
    let segments = free_segments(query, busy);
    let slots = rank_with_policy(query, &segments, limit, policy);

    debug!(
        participants = query.participant_ids().len(),
        busy_intervals = busy.len(),
        segments = segments.len(),
        slots = slots.len(),
        "suggested times computed"
    );

    slots
}

/// Report each participant's merged busy time within the range. Busy intervals
/// of ids outside `participant_ids` are dropped before reporting.
///
/// # Errors
/// Returns `EngineError::InvalidQuery` if `range_start >= range_end`.
pub fn circle_report(
    participant_ids: &BTreeSet<String>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> Result<Vec<MemberAvailability>> {
    let schedules = normalize_all(participant_ids, busy, range_start, range_end);
    let members = report(participant_ids, range_start, range_end, &schedules)?;

    debug!(
        members = members.len(),
        busy_intervals = busy.len(),
        "circle availability computed"
    );

    Ok(members)
}

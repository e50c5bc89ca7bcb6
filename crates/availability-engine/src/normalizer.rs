//! Normalize raw busy intervals into one canonical schedule per participant.
//!
//! Groups intervals by participant, clips them to the query window, sorts by
//! start time and merges overlapping or adjacent periods.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::{BusyInterval, Interval, NormalizedSchedule};

/// Normalize busy intervals into one schedule per participant, clipped to
/// `[window_start, window_end)`.
///
/// Schedules are ordered by participant id. Only participants with at least one
/// interval in the input appear in the output, even if all their intervals were
/// clipped away (their schedule is then empty).
pub fn normalize(
    intervals: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<NormalizedSchedule> {
    let mut grouped: BTreeMap<&str, Vec<Interval>> = BTreeMap::new();

    for busy in intervals {
        let entry = grouped.entry(busy.participant_id.as_str()).or_default();
        // Discard intervals entirely outside the window and those of zero length.
        if let Some(clipped) = Interval::new(busy.start, busy.end).clip(window_start, window_end) {
            entry.push(clipped);
        }
    }

    grouped
        .into_iter()
        .map(|(participant_id, intervals)| NormalizedSchedule {
            participant_id: participant_id.to_string(),
            intervals: merge_intervals(intervals),
        })
        .collect()
}

/// Like [`normalize`], but also yields an empty schedule for every id in
/// `participant_ids` that has no intervals. Intervals of participants outside
/// `participant_ids` are dropped.
pub fn normalize_all<'a, I>(
    participant_ids: I,
    intervals: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<NormalizedSchedule>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut by_id: BTreeMap<String, NormalizedSchedule> = participant_ids
        .into_iter()
        .map(|id| {
            (
                id.clone(),
                NormalizedSchedule {
                    participant_id: id.clone(),
                    intervals: Vec::new(),
                },
            )
        })
        .collect();

    for schedule in normalize(intervals, window_start, window_end) {
        if let Some(slot) = by_id.get_mut(&schedule.participant_id) {
            *slot = schedule;
        }
    }

    by_id.into_values().collect()
}

/// Merge a list of intervals into a sorted, non-overlapping, non-adjacent list.
pub(crate) fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    // Sort by start time (then by end time for stability).
    intervals.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                // Overlapping or adjacent: extend the current interval.
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

//! Sweep-line intersection of many participants' schedules.
//!
//! Produces a partition of the query range into [`FreeSegment`]s. Each segment is
//! a maximal stretch during which the set of busy participants does not change,
//! tagged with the participants who are free for its whole length.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::types::{AvailabilityQuery, FreeSegment, NormalizedSchedule};

/// Kind of a sweep event. The derived ordering places `BusyEnd` before
/// `BusyStart`, so a participant freed at `T` is processed before one who
/// becomes busy at `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EdgeKind {
    BusyEnd,
    BusyStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Edge<'a> {
    at: DateTime<Utc>,
    kind: EdgeKind,
    participant_id: &'a str,
}

/// Partition `[range_start, range_end)` into free segments.
///
/// Schedules belonging to participants outside the query are ignored. Intervals
/// are clipped to the range, so callers may pass unclipped schedules. Segments
/// are contiguous, ordered by start, and together span exactly the range. A
/// segment where everybody is busy has an empty `free_participant_ids`.
pub fn intersect(query: &AvailabilityQuery, schedules: &[NormalizedSchedule]) -> Vec<FreeSegment> {
    let range_start = query.range_start();
    let range_end = query.range_end();
    let participants = query.participant_ids();

    let mut edges: Vec<Edge<'_>> = Vec::new();
    for schedule in schedules {
        if !participants.contains(&schedule.participant_id) {
            continue;
        }
        for interval in &schedule.intervals {
            let Some(clipped) = interval.clip(range_start, range_end) else {
                continue;
            };
            edges.push(Edge {
                at: clipped.start,
                kind: EdgeKind::BusyStart,
                participant_id: &schedule.participant_id,
            });
            edges.push(Edge {
                at: clipped.end,
                kind: EdgeKind::BusyEnd,
                participant_id: &schedule.participant_id,
            });
        }
    }
    edges.sort_unstable();

    // Reference counts tolerate a participant appearing in several schedules.
    let mut busy: BTreeMap<&str, usize> = BTreeMap::new();
    let mut segments = Vec::new();
    let mut segment_start = range_start;
    let mut segment_free = participants.clone();

    let mut i = 0;
    while i < edges.len() {
        let at = edges[i].at;
        // Ends landing on the range end are handled by the closing sentinel.
        if at >= range_end {
            break;
        }

        while i < edges.len() && edges[i].at == at {
            let edge = edges[i];
            match edge.kind {
                EdgeKind::BusyStart => *busy.entry(edge.participant_id).or_insert(0) += 1,
                EdgeKind::BusyEnd => {
                    if let Some(count) = busy.get_mut(edge.participant_id) {
                        *count -= 1;
                        if *count == 0 {
                            busy.remove(edge.participant_id);
                        }
                    }
                }
            }
            i += 1;
        }

        let free = free_set(participants, &busy);
        if free == segment_free {
            continue;
        }
        if at > segment_start {
            segments.push(FreeSegment {
                start: segment_start,
                end: at,
                free_participant_ids: std::mem::replace(&mut segment_free, free),
            });
            segment_start = at;
        } else {
            // State as of the range start: no segment has opened yet.
            segment_free = free;
        }
    }

    segments.push(FreeSegment {
        start: segment_start,
        end: range_end,
        free_participant_ids: segment_free,
    });

    segments
}

fn free_set(participants: &BTreeSet<String>, busy: &BTreeMap<&str, usize>) -> BTreeSet<String> {
    participants
        .iter()
        .filter(|id| !busy.contains_key(id.as_str()))
        .cloned()
        .collect()
}

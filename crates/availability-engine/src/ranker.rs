//! Rank free segments into a bounded list of suggested meeting times.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::types::{AvailabilityQuery, FreeSegment, TimeSlot};

/// How many candidate windows a single long free segment contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// One window, snapped to the segment start.
    #[default]
    FirstWindow,
    /// Every back-to-back window that fits inside the segment, starting at the
    /// segment start.
    EveryWindow,
}

/// Rank free segments using [`WindowPolicy::FirstWindow`].
///
/// See [`rank_with_policy`].
pub fn rank(query: &AvailabilityQuery, segments: &[FreeSegment], limit: usize) -> Vec<TimeSlot> {
    rank_with_policy(query, segments, limit, WindowPolicy::FirstWindow)
}

/// Turn free segments into at most `limit` suggested slots.
///
/// Segments shorter than the query's minimum duration, and segments where nobody
/// is free, produce nothing. Every slot lasts exactly the minimum duration.
/// Slots are ordered by number of available participants (descending), then by
/// start time (ascending). An empty result means no good time was found.
pub fn rank_with_policy(
    query: &AvailabilityQuery,
    segments: &[FreeSegment],
    limit: usize,
    policy: WindowPolicy,
) -> Vec<TimeSlot> {
    let duration = query.min_duration();

    let mut candidates: Vec<TimeSlot> = Vec::new();
    for segment in segments {
        if segment.free_participant_ids.is_empty() || segment.duration() < duration {
            continue;
        }

        let mut start = segment.start;
        while let Some(end) = start.checked_add_signed(duration) {
            if end > segment.end {
                break;
            }
            candidates.push(TimeSlot {
                start,
                end,
                available_participant_ids: segment.free_participant_ids.clone(),
                total_available: segment.free_participant_ids.len(),
            });
            if policy == WindowPolicy::FirstWindow {
                break;
            }
            start = end;
        }
    }

    candidates.sort_by_key(|slot| (Reverse(slot.total_available), slot.start));
    candidates.truncate(limit);
    candidates
}

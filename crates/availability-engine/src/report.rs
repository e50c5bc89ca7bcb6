//! Per-member busy report for the circle availability view.
//!
//! No intersection and no ranking: each member's busy time is returned on its
//! own so the caller can render a stacked calendar. Clipping and merging go
//! through the same code as the suggested-times path, so both features agree on
//! what counts as busy.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::normalizer::merge_intervals;
use crate::types::{validate_range, MemberAvailability, NormalizedSchedule};

/// Build one [`MemberAvailability`] per requested participant, ordered by id.
///
/// Busy times are clipped to `[range_start, range_end)` and merged. A participant
/// without a schedule is reported with no busy times. Schedules for ids outside
/// `participant_ids` are ignored.
///
/// # Errors
/// Returns `EngineError::InvalidQuery` if `range_start >= range_end`.
pub fn report<'a, I>(
    participant_ids: I,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    schedules: &[NormalizedSchedule],
) -> Result<Vec<MemberAvailability>>
where
    I: IntoIterator<Item = &'a String>,
{
    validate_range(range_start, range_end)?;

    let mut by_id: BTreeMap<&str, Vec<_>> = participant_ids
        .into_iter()
        .map(|id| (id.as_str(), Vec::new()))
        .collect();

    for schedule in schedules {
        if let Some(busy) = by_id.get_mut(schedule.participant_id.as_str()) {
            busy.extend(
                schedule
                    .intervals
                    .iter()
                    .filter_map(|i| i.clip(range_start, range_end)),
            );
        }
    }

    Ok(by_id
        .into_iter()
        .map(|(participant_id, busy)| MemberAvailability {
            participant_id: participant_id.to_string(),
            busy_times: merge_intervals(busy),
        })
        .collect())
}

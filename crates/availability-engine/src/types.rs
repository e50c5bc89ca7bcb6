//! Value types shared by the normalizer, the sweep, the ranker and the reporter.
//!
//! Every type here is constructed and discarded within a single query. Sets of
//! participant ids are `BTreeSet`s so that all output is deterministic.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A half-open range `[start, end)` during which one participant is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    pub participant_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(
        participant_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            start,
            end,
        }
    }
}

/// A participant-free half-open time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Clip to `[window_start, window_end)`. Returns `None` when nothing of
    /// positive length remains.
    pub fn clip(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Option<Self> {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        (start < end).then_some(Self { start, end })
    }
}

/// One participant's busy intervals after merging: sorted by start,
/// non-overlapping and non-adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSchedule {
    pub participant_id: String,
    pub intervals: Vec<Interval>,
}

impl NormalizedSchedule {
    /// Expand back into raw busy intervals, e.g. to feed the normalizer again.
    pub fn to_busy_intervals(&self) -> Vec<BusyInterval> {
        self.intervals
            .iter()
            .map(|i| BusyInterval::new(self.participant_id.clone(), i.start, i.end))
            .collect()
    }
}

/// A validated availability query.
///
/// Fields are private so that every instance upholds: a non-empty participant
/// set, a minimum duration of at least one minute that fits in a `Duration`,
/// and `range_start < range_end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    participant_ids: BTreeSet<String>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    min_duration: Duration,
}

impl AvailabilityQuery {
    /// # Errors
    /// Returns `EngineError::InvalidQuery` if the participant set is empty, the
    /// minimum duration is below one minute or too large to represent, or the
    /// range is empty or inverted.
    pub fn new<I, S>(
        participant_ids: I,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        min_duration_minutes: i64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let participant_ids: BTreeSet<String> =
            participant_ids.into_iter().map(Into::into).collect();

        if participant_ids.is_empty() {
            return Err(EngineError::InvalidQuery(
                "participant set must not be empty".to_string(),
            ));
        }
        if min_duration_minutes < 1 {
            return Err(EngineError::InvalidQuery(format!(
                "minimum duration must be at least 1 minute, got {}",
                min_duration_minutes
            )));
        }
        let min_duration = Duration::try_minutes(min_duration_minutes).ok_or_else(|| {
            EngineError::InvalidQuery(format!(
                "minimum duration of {} minutes is out of range",
                min_duration_minutes
            ))
        })?;
        validate_range(range_start, range_end)?;

        Ok(Self {
            participant_ids,
            range_start,
            range_end,
            min_duration,
        })
    }

    pub fn participant_ids(&self) -> &BTreeSet<String> {
        &self.participant_ids
    }

    pub fn range_start(&self) -> DateTime<Utc> {
        self.range_start
    }

    pub fn range_end(&self) -> DateTime<Utc> {
        self.range_end
    }

    pub fn min_duration_minutes(&self) -> i64 {
        self.min_duration.num_minutes()
    }

    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }
}

/// Reject empty or inverted ranges.
pub(crate) fn validate_range(range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> Result<()> {
    if range_start >= range_end {
        return Err(EngineError::InvalidQuery(format!(
            "range start {} must be before range end {}",
            range_start.to_rfc3339(),
            range_end.to_rfc3339()
        )));
    }
    Ok(())
}

/// A maximal stretch of the query range during which the busy set is constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSegment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Participants with no busy interval anywhere in this segment.
    pub free_participant_ids: BTreeSet<String>,
}

impl FreeSegment {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A ranked, fixed-duration candidate meeting time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available_participant_ids: BTreeSet<String>,
    pub total_available: usize,
}

/// One entry of a circle availability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAvailability {
    pub participant_id: String,
    pub busy_times: Vec<Interval>,
}

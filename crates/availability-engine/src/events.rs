//! Event conversion -- turns raw calendar events into busy intervals.
//!
//! Events arrive from the event-source collaborator already expanded to concrete
//! instants. An event may lack an end time; [`MissingEndPolicy`] decides what
//! that means instead of guessing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::BusyInterval;

/// A single calendar event belonging to one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub participant_id: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    pub fn new(
        participant_id: impl Into<String>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            start,
            end,
        }
    }
}

/// Policy for events that have no end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MissingEndPolicy {
    /// Drop the event; it contributes no busy time.
    #[default]
    Exclude,
    /// Treat the event as occupying `minutes` from its start.
    DefaultDuration { minutes: u32 },
}

/// Convert events into busy intervals under the given policy.
///
/// Events whose end is not after their start, and events without an end under
/// [`MissingEndPolicy::Exclude`], are skipped.
pub fn to_busy_intervals(events: &[CalendarEvent], policy: MissingEndPolicy) -> Vec<BusyInterval> {
    events
        .iter()
        .filter_map(|event| {
            let end = match (event.end, policy) {
                (Some(end), _) => end,
                (None, MissingEndPolicy::DefaultDuration { minutes }) => {
                    event.start + Duration::minutes(i64::from(minutes))
                }
                (None, MissingEndPolicy::Exclude) => {
                    debug!(
                        participant_id = %event.participant_id,
                        start = %event.start,
                        "event without end time excluded"
                    );
                    return None;
                }
            };

            if end <= event.start {
                debug!(
                    participant_id = %event.participant_id,
                    start = %event.start,
                    end = %end,
                    "event with non-positive duration skipped"
                );
                return None;
            }

            Some(BusyInterval::new(event.participant_id.clone(), event.start, end))
        })
        .collect()
}

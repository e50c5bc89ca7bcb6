//! Wire shapes shared with the application, plus ISO 8601 helpers.
//!
//! Field names follow the app's JSON contracts (camelCase). Everything here is a
//! plain DTO; the engine itself only sees parsed instants and opaque ids.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::Interval;

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset, e.g. "2026-02-17T14:00:00+00:00" or
/// "2026-02-17T14:00:00.000Z") and naive local time (e.g.
/// "2026-02-17T14:00:00"), which is interpreted as UTC.
///
/// # Errors
/// Returns `EngineError::InvalidDatetime` if neither format matches.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| EngineError::InvalidDatetime {
            input: s.to_string(),
            reason: e.to_string(),
        })
}

/// Format an instant as RFC 3339 with second precision and a `Z` suffix.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Request body for the suggested-times feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedTimesRequest {
    pub friend_ids: Vec<String>,
    pub date_range: DateRange,
    /// Slot length in minutes; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Display metadata attached to an available friend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDto {
    pub start: String,
    pub end: String,
    pub available_friends: Vec<FriendSummary>,
    pub total_available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTimesResponse {
    pub slots: Vec<TimeSlotDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalDto {
    pub start: String,
    pub end: String,
}

impl From<&Interval> for IntervalDto {
    fn from(i: &Interval) -> Self {
        Self {
            start: format_datetime(i.start),
            end: format_datetime(i.end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAvailabilityDto {
    pub user_id: String,
    pub busy_times: Vec<IntervalDto>,
}

/// Response body for the circle availability screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleAvailabilityResponse {
    pub availability: Vec<MemberAvailabilityDto>,
    pub start_date: String,
    pub end_date: String,
}

//! Boundary layer: resolves ids into events, runs the engine, decorates output.
//!
//! The engine proper works over opaque ids and instants. This module owns the
//! collaborator seams (event source, member directory, circle directory), the
//! ISO 8601 request/response shapes, and the configured defaults.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::contract::{
    format_datetime, parse_datetime, CircleAvailabilityResponse, FriendSummary, IntervalDto,
    MemberAvailabilityDto, SuggestedTimesRequest, SuggestedTimesResponse, TimeSlotDto,
};
use crate::engine::{circle_report, suggest_times};
use crate::error::{BoxError, EngineError, Result};
use crate::events::{to_busy_intervals, CalendarEvent};
use crate::types::{AvailabilityQuery, BusyInterval};

/// Supplies a participant's events overlapping a time range.
pub trait EventSource {
    /// Return the events of `participant_id` that overlap `[start, end)`.
    ///
    /// # Errors
    /// Implementations return any retrieval failure; the service wraps it in
    /// `EngineError::Source`.
    fn events_overlapping(
        &self,
        participant_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<CalendarEvent>, BoxError>;
}

/// Display metadata for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Looks up display metadata for user ids.
pub trait MemberDirectory {
    fn profile(&self, user_id: &str) -> Option<MemberProfile>;
}

/// Resolves circle membership.
pub trait CircleDirectory {
    fn members(&self, circle_id: &str) -> Option<Vec<String>>;
}

/// An in-memory calendar implementing every collaborator trait.
///
/// Deserializes from `{"events": [...], "members": [...], "circles": {...}}`;
/// every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryCalendar {
    pub events: Vec<CalendarEvent>,
    pub members: Vec<MemberProfile>,
    pub circles: BTreeMap<String, Vec<String>>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: CalendarEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_member(mut self, profile: MemberProfile) -> Self {
        self.members.push(profile);
        self
    }

    pub fn with_circle<I, S>(mut self, circle_id: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.circles
            .insert(circle_id.into(), members.into_iter().map(Into::into).collect());
        self
    }
}

impl EventSource for InMemoryCalendar {
    fn events_overlapping(
        &self,
        participant_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<CalendarEvent>, BoxError> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.participant_id == participant_id)
            .filter(|e| match e.end {
                Some(event_end) => e.start < end && event_end > start,
                None => e.start >= start && e.start < end,
            })
            .cloned()
            .collect())
    }
}

impl MemberDirectory for InMemoryCalendar {
    fn profile(&self, user_id: &str) -> Option<MemberProfile> {
        self.members.iter().find(|m| m.id == user_id).cloned()
    }
}

impl CircleDirectory for InMemoryCalendar {
    fn members(&self, circle_id: &str) -> Option<Vec<String>> {
        self.circles.get(circle_id).cloned()
    }
}

/// Request-level entry point for the suggested-times and circle features.
pub struct AvailabilityService<'a> {
    config: EngineConfig,
    source: &'a dyn EventSource,
    directory: &'a dyn MemberDirectory,
    circles: &'a dyn CircleDirectory,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(
        config: EngineConfig,
        source: &'a dyn EventSource,
        directory: &'a dyn MemberDirectory,
        circles: &'a dyn CircleDirectory,
    ) -> Self {
        Self {
            config,
            source,
            directory,
            circles,
        }
    }

    /// Build a service whose collaborators are all the same value.
    pub fn with_calendar<C>(config: EngineConfig, calendar: &'a C) -> Self
    where
        C: EventSource + MemberDirectory + CircleDirectory,
    {
        Self::new(config, calendar, calendar, calendar)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute ranked suggested times for a group of friends.
    ///
    /// # Errors
    /// - `EngineError::InvalidDatetime` if a date in the range does not parse.
    /// - `EngineError::InvalidQuery` for an empty friend list, an empty range, or
    ///   a duration below the configured minimum.
    /// - `EngineError::Source` if fetching any friend's events fails.
    pub fn suggested_times(
        &self,
        request: &SuggestedTimesRequest,
    ) -> Result<SuggestedTimesResponse> {
        let range_start = parse_datetime(&request.date_range.start)?;
        let range_end = parse_datetime(&request.date_range.end)?;

        let duration = request
            .duration
            .unwrap_or(self.config.default_duration_minutes);
        if duration < self.config.min_duration_minutes {
            return Err(EngineError::InvalidQuery(format!(
                "duration must be at least {} minutes, got {}",
                self.config.min_duration_minutes, duration
            )));
        }

        let query = AvailabilityQuery::new(
            request.friend_ids.iter().cloned(),
            range_start,
            range_end,
            duration,
        )?;

        let busy = self.fetch_busy(query.participant_ids(), range_start, range_end)?;
        let slots = suggest_times(
            &query,
            &busy,
            self.config.max_suggestions,
            self.config.window_policy,
        );

        info!(
            friends = query.participant_ids().len(),
            duration_minutes = duration,
            slots = slots.len(),
            "suggested times"
        );

        Ok(SuggestedTimesResponse {
            slots: slots
                .into_iter()
                .map(|slot| TimeSlotDto {
                    start: format_datetime(slot.start),
                    end: format_datetime(slot.end),
                    available_friends: slot
                        .available_participant_ids
                        .iter()
                        .map(|id| self.friend_summary(id))
                        .collect(),
                    total_available: slot.total_available,
                })
                .collect(),
        })
    }

    /// Report the busy times of every member of a circle, over the configured
    /// window around `now`.
    ///
    /// # Errors
    /// - `EngineError::UnknownCircle` if the circle does not exist.
    /// - `EngineError::Config` if the configured window cannot be placed around `now`.
    /// - `EngineError::Source` if fetching any member's events fails.
    pub fn circle_availability(
        &self,
        circle_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CircleAvailabilityResponse> {
        let (start, end) = self.circle_window(now)?;
        self.circle_availability_between(circle_id, start, end)
    }

    /// Report the busy times of every member of a circle over an explicit window.
    ///
    /// # Errors
    /// - `EngineError::UnknownCircle` if the circle does not exist.
    /// - `EngineError::InvalidQuery` if `start >= end`.
    /// - `EngineError::Source` if fetching any member's events fails.
    pub fn circle_availability_between(
        &self,
        circle_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<CircleAvailabilityResponse> {
        let members: BTreeSet<String> = self
            .circles
            .members(circle_id)
            .ok_or_else(|| EngineError::UnknownCircle(circle_id.to_string()))?
            .into_iter()
            .collect();

        let busy = self.fetch_busy(&members, start, end)?;
        let report = circle_report(&members, start, end, &busy)?;

        info!(circle_id, members = report.len(), "circle availability");

        Ok(CircleAvailabilityResponse {
            availability: report
                .iter()
                .map(|member| MemberAvailabilityDto {
                    user_id: member.participant_id.clone(),
                    busy_times: member.busy_times.iter().map(IntervalDto::from).collect(),
                })
                .collect(),
            start_date: format_datetime(start),
            end_date: format_datetime(end),
        })
    }

    /// `[start_of_day(now) - lookback, start_of_day(now) + lookahead)`.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if either bound falls outside the
    /// representable date range.
    pub fn circle_window(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let out_of_range = || {
            EngineError::Config(format!(
                "circle window of -{}/+{} days around {} is out of range",
                self.config.circle_lookback_days,
                self.config.circle_lookahead_days,
                format_datetime(today)
            ))
        };
        let start = Duration::try_days(self.config.circle_lookback_days)
            .and_then(|back| today.checked_sub_signed(back))
            .ok_or_else(out_of_range)?;
        let end = Duration::try_days(self.config.circle_lookahead_days)
            .and_then(|ahead| today.checked_add_signed(ahead))
            .ok_or_else(out_of_range)?;
        Ok((start, end))
    }

    fn fetch_busy(
        &self,
        participant_ids: &BTreeSet<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>> {
        let mut events = Vec::new();
        for participant_id in participant_ids {
            let fetched = self
                .source
                .events_overlapping(participant_id, start, end)
                .map_err(|source| EngineError::Source {
                    participant_id: participant_id.clone(),
                    source,
                })?;
            debug!(participant_id = %participant_id, events = fetched.len(), "events fetched");
            events.extend(fetched);
        }
        Ok(to_busy_intervals(&events, self.config.missing_end))
    }

    fn friend_summary(&self, user_id: &str) -> FriendSummary {
        match self.directory.profile(user_id) {
            Some(profile) => FriendSummary {
                id: profile.id,
                name: profile.name,
                image: profile.image,
            },
            None => FriendSummary {
                id: user_id.to_string(),
                name: user_id.to_string(),
                image: None,
            },
        }
    }
}

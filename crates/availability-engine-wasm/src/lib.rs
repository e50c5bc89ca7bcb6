//! WASM bindings for availability-engine.
//!
//! Exposes suggested times, circle availability, normalization and the raw
//! free-segment sweep to JavaScript via `wasm-bindgen`. All complex types are
//! passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/availability-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::contract::{format_datetime, parse_datetime, SuggestedTimesRequest};
use availability_engine::{
    AvailabilityQuery, AvailabilityService, BusyInterval, EngineConfig, FreeSegment,
    InMemoryCalendar, NormalizedSchedule,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for busy intervals passed from JavaScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BusyInput {
    participant_id: String,
    start: String,
    end: String,
}

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDto {
    participant_id: String,
    intervals: Vec<IntervalDto>,
}

impl From<&NormalizedSchedule> for ScheduleDto {
    fn from(s: &NormalizedSchedule) -> Self {
        Self {
            participant_id: s.participant_id.clone(),
            intervals: s
                .intervals
                .iter()
                .map(|i| IntervalDto {
                    start: format_datetime(i.start),
                    end: format_datetime(i.end),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeSegmentDto {
    start: String,
    end: String,
    free_participant_ids: Vec<String>,
    duration_minutes: i64,
}

impl From<&FreeSegment> for FreeSegmentDto {
    fn from(s: &FreeSegment) -> Self {
        Self {
            start: format_datetime(s.start),
            end: format_datetime(s.end),
            free_participant_ids: s.free_participant_ids.iter().cloned().collect(),
            duration_minutes: s.duration().num_minutes(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    parse_datetime(s).map_err(js_err)
}

fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy intervals JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_instant(&input.start)?;
            let end = parse_instant(&input.end)?;
            Ok(BusyInterval::new(input.participant_id, start, end))
        })
        .collect()
}

fn parse_calendar_json(json: &str) -> Result<InMemoryCalendar, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid calendar JSON: {}", e)))
}

fn parse_config(config_toml: Option<String>) -> Result<EngineConfig, JsValue> {
    match config_toml {
        Some(toml) => EngineConfig::from_toml_str(&toml).map_err(js_err),
        None => Ok(EngineConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute ranked suggested times.
///
/// - `request_json` -- `{friendIds, dateRange: {start, end}, duration?}`
/// - `calendar_json` -- `{events: [{participantId, start, end?}], members: [{id, name, image?}]}`
/// - `config_toml` -- Optional engine configuration (TOML)
///
/// Returns `{slots: [{start, end, availableFriends, totalAvailable}]}` as JSON.
#[wasm_bindgen(js_name = "suggestTimes")]
pub fn suggest_times(
    request_json: &str,
    calendar_json: &str,
    config_toml: Option<String>,
) -> Result<String, JsValue> {
    let request: SuggestedTimesRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;
    let calendar = parse_calendar_json(calendar_json)?;
    let config = parse_config(config_toml)?;

    let response = AvailabilityService::with_calendar(config, &calendar)
        .suggested_times(&request)
        .map_err(js_err)?;

    to_json(&response)
}

/// Report each circle member's busy times over the configured window around `now`.
///
/// `calendar_json` must include a `circles` object mapping circle ids to member
/// ids. Returns `{availability: [{userId, busyTimes}], startDate, endDate}`.
#[wasm_bindgen(js_name = "circleAvailability")]
pub fn circle_availability(
    circle_id: &str,
    calendar_json: &str,
    now: &str,
    config_toml: Option<String>,
) -> Result<String, JsValue> {
    let calendar = parse_calendar_json(calendar_json)?;
    let config = parse_config(config_toml)?;
    let now = parse_instant(now)?;

    let response = AvailabilityService::with_calendar(config, &calendar)
        .circle_availability(circle_id, now)
        .map_err(js_err)?;

    to_json(&response)
}

/// Normalize busy intervals into merged per-participant schedules.
///
/// `busy_json` is a JSON array of `{participantId, start, end}`. Returns an array
/// of `{participantId, intervals: [{start, end}]}`.
#[wasm_bindgen(js_name = "normalizeBusy")]
pub fn normalize_busy(
    busy_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    let busy = parse_busy_json(busy_json)?;
    let ws = parse_instant(window_start)?;
    let we = parse_instant(window_end)?;

    let schedules = availability_engine::normalize(&busy, ws, we);

    let dtos: Vec<ScheduleDto> = schedules.iter().map(ScheduleDto::from).collect();
    to_json(&dtos)
}

/// Partition a window into free segments for a set of participants.
///
/// `participants_json` is a JSON array of ids; `busy_json` as for
/// [`normalize_busy`]. Returns an array of
/// `{start, end, freeParticipantIds, durationMinutes}`.
#[wasm_bindgen(js_name = "findFreeSegments")]
pub fn find_free_segments(
    participants_json: &str,
    busy_json: &str,
    window_start: &str,
    window_end: &str,
    min_duration_minutes: i32,
) -> Result<String, JsValue> {
    let participants: Vec<String> = serde_json::from_str(participants_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid participants JSON: {}", e)))?;
    let busy = parse_busy_json(busy_json)?;
    let ws = parse_instant(window_start)?;
    let we = parse_instant(window_end)?;

    let query = AvailabilityQuery::new(participants, ws, we, i64::from(min_duration_minutes))
        .map_err(js_err)?;
    let segments = availability_engine::free_segments(&query, &busy);

    let dtos: Vec<FreeSegmentDto> = segments.iter().map(FreeSegmentDto::from).collect();
    to_json(&dtos)
}

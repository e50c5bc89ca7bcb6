//! # availability-engine
//!
//! Deterministic multi-party availability for a social calendar.
//!
//! Given a set of people, each with busy intervals derived from their events,
//! the engine computes which parts of a date range are free for some or all of
//! them, filters by a minimum duration, and ranks the result into a short list of
//! suggested times. A lighter path reports each member's merged busy time for the
//! stacked circle view.
//!
//! Every engine function is pure and synchronous. Fetching events is the
//! caller's job (see [`service::EventSource`]); all instants are UTC.
//!
//! ## Modules
//!
//! - [`events`] — Calendar events → busy intervals, with a missing-end policy
//! - [`normalizer`] — Group, clip, sort and merge busy intervals per participant
//! - [`intersect`] — Sweep-line partition of a range into free segments
//! - [`ranker`] — Free segments → ranked, fixed-duration suggested slots
//! - [`report`] — Per-member busy report for circles
//! - [`engine`] — End-to-end pipelines over busy intervals
//! - [`service`] — Collaborator traits and the request-level service
//! - [`contract`] — JSON request/response shapes and ISO 8601 helpers
//! - [`config`] — Engine configuration (TOML)
//! - [`types`] — Shared value types
//! - [`error`] — Error types

pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod events;
pub mod intersect;
pub mod normalizer;
pub mod ranker;
pub mod report;
pub mod service;
pub mod types;

pub use config::EngineConfig;
pub use engine::{circle_report, free_segments, suggest_times};
pub use error::EngineError;
pub use events::{to_busy_intervals, CalendarEvent, MissingEndPolicy};
pub use intersect::intersect;
pub use normalizer::{normalize, normalize_all};
pub use ranker::{rank, rank_with_policy, WindowPolicy};
pub use report::report;
pub use service::{
    AvailabilityService, CircleDirectory, EventSource, InMemoryCalendar, MemberDirectory,
    MemberProfile,
};
pub use types::{
    AvailabilityQuery, BusyInterval, FreeSegment, Interval, MemberAvailability,
    NormalizedSchedule, TimeSlot,
};

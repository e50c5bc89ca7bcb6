//! `availability` CLI — suggested times, circle availability and free segments
//! from JSON documents on the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Suggested times (stdin → stdout)
//! availability suggest < suggest.json
//!
//! # Suggested times with a config file and a custom cap
//! availability --config availability.toml --limit 3 suggest -i suggest.json
//!
//! # Circle availability, written to a file
//! availability circle -i circle.json -o report.json
//!
//! # Raw free-segment partition
//! availability segments -i segments.json
//!
//! # Debug logging goes to stderr
//! RUST_LOG=availability_engine=debug availability suggest -i suggest.json
//! ```
//!
//! Every input document carries a `calendar` object:
//! `{"events": [{participantId, start, end?}], "members": [{id, name, image?}],
//! "circles": {"<circleId>": ["<userId>", ...]}}`.

use std::io::{self, Read};

use anyhow::{Context, Result};
use availability_engine::contract::{parse_datetime, DateRange, SuggestedTimesRequest};
use availability_engine::{
    free_segments, to_busy_intervals, AvailabilityQuery, AvailabilityService, EngineConfig,
    EventSource, InMemoryCalendar,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Multi-party availability and suggested meeting times"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<String>,

    /// Maximum number of suggested slots (overrides the config file)
    #[arg(long, global = true)]
    limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank suggested meeting times for a group of friends
    Suggest {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report each circle member's busy times
    Circle {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show the raw free-segment partition of a date range
    Segments {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Deserialize)]
struct SuggestInput {
    request: SuggestedTimesRequest,
    #[serde(default)]
    calendar: InMemoryCalendar,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CircleInput {
    circle_id: String,
    /// Reference instant for the configured window; defaults to the current time.
    #[serde(default)]
    now: Option<String>,
    /// Explicit window, taking precedence over `now`.
    #[serde(default)]
    date_range: Option<DateRange>,
    #[serde(default)]
    calendar: InMemoryCalendar,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SegmentsInput {
    participant_ids: Vec<String>,
    date_range: DateRange,
    #[serde(default)]
    calendar: InMemoryCalendar,
}

/// The sweep never looks at the minimum duration; any valid value will do.
const SEGMENT_QUERY_MINUTES: i64 = 1;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON. RUST_LOG overrides the level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.limit)?;

    match cli.command {
        Commands::Suggest { input, output } => {
            let raw = read_input(input.as_deref())?;
            let doc: SuggestInput =
                serde_json::from_str(&raw).context("Failed to parse suggest input JSON")?;

            let service = AvailabilityService::with_calendar(config, &doc.calendar);
            let response = service
                .suggested_times(&doc.request)
                .context("Failed to compute suggested times")?;

            info!(slots = response.slots.len(), "suggest finished");
            write_json(output.as_deref(), &response)?;
        }
        Commands::Circle { input, output } => {
            let raw = read_input(input.as_deref())?;
            let doc: CircleInput =
                serde_json::from_str(&raw).context("Failed to parse circle input JSON")?;

            let service = AvailabilityService::with_calendar(config, &doc.calendar);
            let response = match (&doc.date_range, &doc.now) {
                (Some(range), _) => {
                    let start = parse_datetime(&range.start)?;
                    let end = parse_datetime(&range.end)?;
                    service.circle_availability_between(&doc.circle_id, start, end)
                }
                (None, Some(now)) => {
                    service.circle_availability(&doc.circle_id, parse_datetime(now)?)
                }
                (None, None) => service.circle_availability(&doc.circle_id, Utc::now()),
            }
            .with_context(|| {
                format!(
                    "Failed to compute availability for circle '{}'",
                    doc.circle_id
                )
            })?;

            info!(members = response.availability.len(), "circle finished");
            write_json(output.as_deref(), &response)?;
        }
        Commands::Segments { input, output } => {
            let raw = read_input(input.as_deref())?;
            let doc: SegmentsInput =
                serde_json::from_str(&raw).context("Failed to parse segments input JSON")?;

            let start = parse_datetime(&doc.date_range.start)?;
            let end = parse_datetime(&doc.date_range.end)?;
            let query =
                AvailabilityQuery::new(doc.participant_ids, start, end, SEGMENT_QUERY_MINUTES)?;

            let mut events = Vec::new();
            for id in query.participant_ids() {
                events.extend(
                    doc.calendar
                        .events_overlapping(id, start, end)
                        .map_err(|e| anyhow::anyhow!(e))?,
                );
            }
            let busy = to_busy_intervals(&events, config.missing_end);
            let segments = free_segments(&query, &busy);

            info!(segments = segments.len(), "segments finished");
            write_json(output.as_deref(), &segments)?;
        }
    }

    Ok(())
}

/// Load the config file (if any) and apply command-line overrides.
fn load_config(path: Option<&str>, limit: Option<usize>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };
    if let Some(limit) = limit {
        config.max_suggestions = limit;
    }
    Ok(config)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: serde::Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, pretty)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", pretty);
        }
    }
    Ok(())
}

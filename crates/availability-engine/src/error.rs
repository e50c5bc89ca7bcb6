//! Error types for availability-engine operations.

use thiserror::Error;

/// Boxed error returned by collaborator implementations (event sources).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Caller misuse: empty participant set, bad duration, or an empty range.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid datetime '{input}': {reason}")]
    InvalidDatetime { input: String, reason: String },

    #[error("Unknown circle: {0}")]
    UnknownCircle(String),

    /// The event source failed while fetching a participant's events.
    #[error("Event source failed for participant '{participant_id}': {source}")]
    Source {
        participant_id: String,
        #[source]
        source: BoxError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

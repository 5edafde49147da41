//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// The availability policy violates one of its construction invariants.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A calendar data source could not serve the requested calendar.
    #[error("Calendar '{calendar}' unavailable: {reason}")]
    CalendarUnavailable { calendar: String, reason: String },

    #[error("Event data parse error: {0}")]
    EventParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;

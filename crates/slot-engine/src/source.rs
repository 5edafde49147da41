//! Calendar data sources and multi-calendar aggregation.
//!
//! A [`CalendarSource`] serves the events of one calendar within a time range.
//! [`collect_busy_intervals`] combines the user's calendar with any colleague
//! calendars into one interval list. A calendar the source cannot serve is logged and
//! left out; it never aborts the overall fetch.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::ProviderEvent;
use crate::interval::{overlaps, BusyInterval, EventTime};

/// Serves calendar events already normalized into busy intervals.
pub trait CalendarSource {
    /// Events of `calendar_id` that intersect `[time_min, time_max)`.
    ///
    /// # Errors
    /// Returns `SlotError::CalendarUnavailable` when the calendar cannot be read.
    fn fetch_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>>;
}

/// A JSON event dump: `{"calendars": {"<calendar id>": [<provider event>, ...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonCalendarSource {
    #[serde(default)]
    pub calendars: BTreeMap<String, Vec<ProviderEvent>>,
}

impl JsonCalendarSource {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl CalendarSource for JsonCalendarSource {
    fn fetch_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>> {
        let events = self
            .calendars
            .get(calendar_id)
            .ok_or_else(|| SlotError::CalendarUnavailable {
                calendar: calendar_id.to_string(),
                reason: "calendar not present in event data".to_string(),
            })?;

        Ok(events
            .iter()
            .map(ProviderEvent::to_interval)
            .filter(|interval| intersects(interval, time_min, time_max))
            .collect())
    }
}

/// Only timed intervals can be placed relative to the range; keep everything else.
fn intersects(interval: &BusyInterval, time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> bool {
    match (interval.start, interval.end) {
        (Some(EventTime::At(start)), Some(EventTime::At(end))) => {
            overlaps(start, end, time_min, time_max)
        }
        _ => true,
    }
}

/// What happened to one calendar during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched { events: usize },
    Skipped { reason: String },
}

/// Per-calendar outcome of [`collect_busy_intervals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFetch {
    pub calendar_id: String,
    pub outcome: FetchOutcome,
}

/// Combined intervals across calendars plus a per-calendar report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    pub intervals: Vec<BusyInterval>,
    pub calendars: Vec<CalendarFetch>,
}

impl FetchReport {
    /// Calendar ids that could not be read.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.calendars.iter().filter_map(|c| match c.outcome {
            FetchOutcome::Skipped { .. } => Some(c.calendar_id.as_str()),
            FetchOutcome::Fetched { .. } => None,
        })
    }
}

/// Fetch `primary` and every colleague calendar and combine their intervals.
///
/// Unreadable calendars are reported as [`FetchOutcome::Skipped`] and contribute no
/// intervals.
pub fn collect_busy_intervals(
    source: &dyn CalendarSource,
    primary: &str,
    colleagues: &[String],
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
) -> FetchReport {
    let mut report = FetchReport::default();

    let calendar_ids = std::iter::once(primary).chain(colleagues.iter().map(String::as_str));
    for calendar_id in calendar_ids {
        let outcome = match source.fetch_events(calendar_id, time_min, time_max) {
            Ok(events) => {
                tracing::info!(calendar = calendar_id, events = events.len(), "fetched calendar");
                let count = events.len();
                report.intervals.extend(events);
                FetchOutcome::Fetched { events: count }
            }
            Err(e) => {
                tracing::warn!(calendar = calendar_id, error = %e, "skipping inaccessible calendar");
                FetchOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        };
        report.calendars.push(CalendarFetch {
            calendar_id: calendar_id.to_string(),
            outcome,
        });
    }

    report
}

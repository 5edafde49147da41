//! Provider event records and their normalization into [`BusyInterval`]s.
//!
//! The record shape follows the common calendar-provider layout: each end is an
//! object holding either a `dateTime` (timed event) or a `date` (all-day event), plus an
//! optional `transparency` of `"transparent"` for events marked free.
//!
//! Timestamps carrying an offset are used as-is. Naive timestamps are read in the
//! record's `timeZone` when it names a valid IANA zone, and as UTC otherwise.
//! Unparseable timestamps become missing endpoints, which makes the interval
//! non-blocking instead of failing the fetch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::interval::{BusyInterval, EventTime, Transparency};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// One end of a provider event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// A calendar event as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<ProviderTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<ProviderTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<String>,
}

impl ProviderEvent {
    /// Normalize into a [`BusyInterval`]. Never fails; see the module docs.
    pub fn to_interval(&self) -> BusyInterval {
        let transparency = match self.transparency.as_deref() {
            Some("transparent") => Transparency::Transparent,
            _ => Transparency::Opaque,
        };
        let interval = BusyInterval {
            start: self.start.as_ref().and_then(parse_event_time),
            end: self.end.as_ref().and_then(parse_event_time),
            transparency,
        };
        if interval.start.is_none() || interval.end.is_none() {
            tracing::warn!(
                summary = self.summary.as_deref().unwrap_or("<untitled>"),
                "event has a missing or unparseable start/end; treating it as non-blocking"
            );
        }
        interval
    }
}

fn parse_event_time(time: &ProviderTime) -> Option<EventTime> {
    if let Some(raw) = time.date_time.as_deref() {
        return parse_instant(raw, time.time_zone.as_deref()).map(EventTime::At);
    }
    time.date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .map(EventTime::AllDay)
}

/// Parse an RFC 3339 timestamp, or a naive one interpreted in `zone` (UTC when absent).
pub fn parse_instant(raw: &str, zone: Option<&str>) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;

    match zone.and_then(|z| z.parse::<Tz>().ok()) {
        Some(tz) => naive
            .and_local_timezone(tz)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Some(naive.and_utc()),
    }
}

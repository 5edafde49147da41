//! Busy intervals derived from calendar events.
//!
//! A [`BusyInterval`] is one fetched event reduced to what the slot search needs:
//! its start and end (either a concrete instant or an all-day date) and whether the
//! holder marked it as free. Only intervals with two concrete instants and an opaque
//! transparency actually block time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One end of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    /// A concrete instant.
    At(DateTime<Utc>),
    /// An all-day marker with no time of day.
    AllDay(NaiveDate),
}

/// Whether an event occupies the holder's time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transparency {
    /// The event blocks time (the provider default).
    #[default]
    Opaque,
    /// The event is marked "free" and never blocks.
    Transparent,
}

/// A time span during which a calendar holder may be unavailable.
///
/// Missing or unparseable endpoints are kept as `None` so a malformed event
/// never aborts a search; such intervals simply do not block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    #[serde(default)]
    pub transparency: Transparency,
}

impl BusyInterval {
    /// An opaque interval between two instants.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(EventTime::At(start)),
            end: Some(EventTime::At(end)),
            transparency: Transparency::Opaque,
        }
    }

    /// An all-day entry covering `first..=last`.
    pub fn all_day(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: Some(EventTime::AllDay(first)),
            end: Some(EventTime::AllDay(last)),
            transparency: Transparency::Opaque,
        }
    }

    /// The same interval marked as free.
    pub fn transparent(mut self) -> Self {
        self.transparency = Transparency::Transparent;
        self
    }

    /// The `[start, end)` span this interval blocks, if any.
    ///
    /// Returns `None` for all-day entries, transparent entries, entries with a
    /// missing endpoint, and entries whose end is not after their start.
    pub fn blocking_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.transparency == Transparency::Transparent {
            return None;
        }
        match (self.start, self.end) {
            (Some(EventTime::At(start)), Some(EventTime::At(end))) if start < end => {
                Some((start, end))
            }
            _ => None,
        }
    }

    /// Whether this interval really occupies time.
    pub fn blocks(&self) -> bool {
        self.blocking_span().is_some()
    }
}

/// Whether the half-open ranges `[a_start, a_end)` and `[b_start, b_end)` overlap.
///
/// Adjacent ranges, where one ends exactly when the other starts, do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

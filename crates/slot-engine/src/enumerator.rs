//! Candidate slot enumeration across a scan window.
//!
//! Walks civil days in the policy's reference zone, from the day containing
//! `window_start` up to (not including) the day containing `window_end`. Within each
//! day it steps from `work_start_hour:00` to `work_end_hour:00` (exclusive) at the
//! policy's granularity. Every candidate is built from a civil date and clock time in
//! the reference zone, so 09:00 stays 09:00 across a DST transition inside the window.
//!
//! Civil times that do not exist (spring-forward gap) are skipped; civil times that
//! occur twice (fall-back overlap) resolve to the earlier instant. Candidates that
//! start strictly before "now" are never produced.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::policy::AvailabilityPolicy;

/// A potential meeting of the policy's duration, anchored in the reference zone.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl CandidateSlot {
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    /// Hour of day in the reference zone.
    pub fn hour(&self) -> u32 {
        self.start.hour()
    }

    /// Weekday in the reference zone.
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    /// Civil date in the reference zone.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

/// Lazy, finite sequence of candidate slots. See the module docs for the walk order.
#[derive(Debug, Clone)]
pub struct SlotEnumerator<'a> {
    policy: &'a AvailabilityPolicy,
    now: DateTime<Utc>,
    day: NaiveDate,
    end_day: NaiveDate,
    /// Minutes past `work_start_hour:00` of the next candidate on `day`.
    offset_minutes: u32,
}

/// Enumerate candidate slots for `[window_start, window_end)` under `policy`.
///
/// `now` is the evaluation instant; candidates starting before it are dropped.
pub fn enumerate<'a>(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    policy: &'a AvailabilityPolicy,
    now: DateTime<Utc>,
) -> SlotEnumerator<'a> {
    let tz = policy.reference_timezone();
    SlotEnumerator {
        policy,
        now,
        day: window_start.with_timezone(&tz).date_naive(),
        end_day: window_end.with_timezone(&tz).date_naive(),
        offset_minutes: 0,
    }
}

impl Iterator for SlotEnumerator<'_> {
    type Item = CandidateSlot;

    fn next(&mut self) -> Option<CandidateSlot> {
        let tz = self.policy.reference_timezone();
        let day_start = self.policy.work_start_hour() * 60;
        let day_end = self.policy.work_end_hour() * 60;

        while self.day < self.end_day {
            let minute_of_day = day_start + self.offset_minutes;
            if minute_of_day >= day_end {
                self.day = self.day.succ_opt()?;
                self.offset_minutes = 0;
                continue;
            }
            self.offset_minutes += self.policy.slot_granularity_minutes();

            let civil = self
                .day
                .and_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)?;
            let Some(start) = civil.and_local_timezone(tz).earliest() else {
                tracing::debug!(%civil, zone = tz.name(), "skipping nonexistent local time");
                continue;
            };
            if start.with_timezone(&Utc) < self.now {
                continue;
            }

            let end = start + self.policy.meeting_duration();
            return Some(CandidateSlot { start, end });
        }
        None
    }
}

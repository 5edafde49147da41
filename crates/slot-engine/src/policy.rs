//! Availability policy: the immutable rule set a single search runs under.
//!
//! [`PolicySettings`] is the loose, serde-friendly form that configuration files and
//! command-line flags fill in. [`AvailabilityPolicy`] is the validated form the search
//! consumes; it can only be obtained through [`PolicySettings::build`], which fails fast
//! on settings that would make enumeration meaningless.

use std::collections::BTreeSet;

use chrono::{Duration, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const DEFAULT_WORK_START_HOUR: u32 = 9;
pub const DEFAULT_WORK_END_HOUR: u32 = 17;
pub const DEFAULT_MEETING_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u32 = 30;
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;
pub const MAX_LOOKAHEAD_DAYS: u32 = 366;
pub const DEFAULT_REFERENCE_TIMEZONE: &str = "Europe/Berlin";

/// Unvalidated policy values, with built-in defaults for every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    pub work_start_hour: u32,
    pub work_end_hour: u32,
    pub meeting_duration_minutes: u32,
    /// Weekday indices, 0 = Monday .. 6 = Sunday. Empty means every day is eligible.
    pub preferred_weekdays: Vec<u32>,
    /// Hours of day. Empty means every working hour is eligible.
    pub preferred_hours: Vec<u32>,
    pub slot_granularity_minutes: u32,
    pub lookahead_days: u32,
    /// IANA zone used to interpret "hour of day" and "weekday".
    pub reference_timezone: String,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            work_start_hour: DEFAULT_WORK_START_HOUR,
            work_end_hour: DEFAULT_WORK_END_HOUR,
            meeting_duration_minutes: DEFAULT_MEETING_DURATION_MINUTES,
            preferred_weekdays: Vec::new(),
            preferred_hours: Vec::new(),
            slot_granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            reference_timezone: DEFAULT_REFERENCE_TIMEZONE.to_string(),
        }
    }
}

impl PolicySettings {
    /// Validate these settings into an [`AvailabilityPolicy`].
    ///
    /// # Errors
    /// Returns `SlotError::InvalidPolicy` if the working day is empty or out of range,
    /// the duration or granularity is zero, the lookahead is outside
    /// `1..=MAX_LOOKAHEAD_DAYS`, the granularity does not divide
    /// an hour, or a preferred weekday/hour is out of range.
    /// Returns `SlotError::InvalidTimezone` if the reference zone is not a valid IANA
    /// identifier.
    pub fn build(&self) -> Result<AvailabilityPolicy> {
        AvailabilityPolicy::from_settings(self)
    }
}

/// Validated, immutable availability rules for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityPolicy {
    work_start_hour: u32,
    work_end_hour: u32,
    meeting_duration_minutes: u32,
    preferred_weekdays: BTreeSet<u32>,
    preferred_hours: BTreeSet<u32>,
    slot_granularity_minutes: u32,
    lookahead_days: u32,
    reference_timezone: Tz,
}

impl AvailabilityPolicy {
    /// See [`PolicySettings::build`].
    pub fn from_settings(settings: &PolicySettings) -> Result<Self> {
        let work_start_hour = settings.work_start_hour;
        let work_end_hour = settings.work_end_hour;
        let meeting_duration_minutes = settings.meeting_duration_minutes;
        let slot_granularity_minutes = settings.slot_granularity_minutes;
        let lookahead_days = settings.lookahead_days;
        let preferred_weekdays = &settings.preferred_weekdays;
        let preferred_hours = &settings.preferred_hours;
        let reference_timezone = &settings.reference_timezone;

        if work_start_hour > 23 {
            return Err(invalid(format!(
                "work start hour {work_start_hour} is outside 0..=23"
            )));
        }
        if work_end_hour > 24 {
            return Err(invalid(format!(
                "work end hour {work_end_hour} is outside 1..=24"
            )));
        }
        if work_start_hour >= work_end_hour {
            return Err(invalid(format!(
                "work start hour {work_start_hour} must be before work end hour {work_end_hour}"
            )));
        }
        if meeting_duration_minutes == 0 {
            return Err(invalid("meeting duration must be positive".to_string()));
        }
        if slot_granularity_minutes == 0 || 60 % slot_granularity_minutes != 0 {
            return Err(invalid(format!(
                "slot granularity {slot_granularity_minutes} must be a positive divisor of 60"
            )));
        }
        if lookahead_days == 0 || lookahead_days > MAX_LOOKAHEAD_DAYS {
            return Err(invalid(format!(
                "lookahead of {lookahead_days} days is outside 1..={MAX_LOOKAHEAD_DAYS}"
            )));
        }
        if let Some(day) = preferred_weekdays.iter().find(|&&d| d > 6) {
            return Err(invalid(format!(
                "preferred weekday {day} is outside 0 (Monday)..=6 (Sunday)"
            )));
        }
        if let Some(hour) = preferred_hours.iter().find(|&&h| h > 23) {
            return Err(invalid(format!(
                "preferred hour {hour} is outside 0..=23"
            )));
        }

        let reference_timezone: Tz = reference_timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(reference_timezone.clone()))?;

        Ok(Self {
            work_start_hour,
            work_end_hour,
            meeting_duration_minutes,
            preferred_weekdays: preferred_weekdays.iter().copied().collect(),
            preferred_hours: preferred_hours.iter().copied().collect(),
            slot_granularity_minutes,
            lookahead_days,
            reference_timezone,
        })
    }

    pub fn work_start_hour(&self) -> u32 {
        self.work_start_hour
    }

    pub fn work_end_hour(&self) -> u32 {
        self.work_end_hour
    }

    pub fn meeting_duration_minutes(&self) -> u32 {
        self.meeting_duration_minutes
    }

    pub fn meeting_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.meeting_duration_minutes))
    }

    pub fn preferred_weekdays(&self) -> &BTreeSet<u32> {
        &self.preferred_weekdays
    }

    pub fn preferred_hours(&self) -> &BTreeSet<u32> {
        &self.preferred_hours
    }

    pub fn slot_granularity_minutes(&self) -> u32 {
        self.slot_granularity_minutes
    }

    pub fn lookahead_days(&self) -> u32 {
        self.lookahead_days
    }

    pub fn lookahead(&self) -> Duration {
        Duration::days(i64::from(self.lookahead_days))
    }

    pub fn reference_timezone(&self) -> Tz {
        self.reference_timezone
    }

    /// Midpoint of the working day, in fractional hours.
    pub fn mid_day(&self) -> f64 {
        f64::from(self.work_start_hour + self.work_end_hour) / 2.0
    }

    /// Whether `weekday` is listed as preferred (false when no preference is set).
    pub fn is_preferred_weekday(&self, weekday: Weekday) -> bool {
        self.preferred_weekdays.contains(&weekday.num_days_from_monday())
    }

    /// Whether `hour` is listed as preferred (false when no preference is set).
    pub fn is_preferred_hour(&self, hour: u32) -> bool {
        self.preferred_hours.contains(&hour)
    }
}

fn invalid(message: String) -> SlotError {
    SlotError::InvalidPolicy(message)
}

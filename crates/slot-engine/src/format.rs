//! Human-readable slot rendering in the reference zone.
//!
//! Output depends only on the slot's instants and their zone, e.g.
//! `"Monday 1 January at 10:00 AM - 10:30 AM CET"`.

use chrono::Duration;
use chrono_tz::OffsetComponents;

use crate::enumerator::CandidateSlot;

/// `"Monday 1 January at 10:00 AM"`.
pub fn format_slot(slot: &CandidateSlot) -> String {
    slot.start.format("%A %-d %B at %-I:%M %p").to_string()
}

/// The zone abbreviation in effect at the slot's start (`CET` or `CEST` for Berlin).
pub fn zone_label(slot: &CandidateSlot) -> String {
    slot.start.format("%Z").to_string()
}

/// Whether the reference zone observes daylight saving time at the slot's start.
pub fn is_daylight_saving(slot: &CandidateSlot) -> bool {
    slot.start.offset().dst_offset() != Duration::zero()
}

/// `"Monday 1 January at 10:00 AM - 10:30 AM CET"`.
pub fn format_slot_range(slot: &CandidateSlot) -> String {
    format!(
        "{} - {} {}",
        format_slot(slot),
        slot.end.format("%-I:%M %p"),
        zone_label(slot)
    )
}

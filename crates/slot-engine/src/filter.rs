//! Availability filter: the two predicates a candidate must pass before scoring.
//!
//! - **Conflict-free**: no blocking interval overlaps the candidate's `[start, end)`.
//!   Both sides are compared as UTC instants; adjacent intervals are not conflicts.
//! - **Policy-eligible**: the candidate's reference-zone weekday and hour satisfy the
//!   working-hour bounds and any non-empty preferred-weekday/preferred-hour sets.

use crate::enumerator::CandidateSlot;
use crate::interval::{overlaps, BusyInterval};
use crate::policy::AvailabilityPolicy;

/// Whether no blocking interval overlaps `slot`.
pub fn is_conflict_free(slot: &CandidateSlot, intervals: &[BusyInterval]) -> bool {
    let slot_start = slot.start_utc();
    let slot_end = slot.end_utc();

    !intervals
        .iter()
        .filter_map(BusyInterval::blocking_span)
        .any(|(start, end)| overlaps(slot_start, slot_end, start, end))
}

/// Whether `slot` falls on an eligible weekday and hour under `policy`.
///
/// Rejects when the preferred-weekday set is non-empty and excludes the slot's weekday,
/// when the slot's hour is outside `[work_start_hour, work_end_hour)`, or when the
/// preferred-hour set is non-empty and excludes the slot's hour.
pub fn is_within_working_hours(slot: &CandidateSlot, policy: &AvailabilityPolicy) -> bool {
    let hour = slot.hour();

    if !policy.preferred_weekdays().is_empty() && !policy.is_preferred_weekday(slot.weekday()) {
        return false;
    }
    if hour < policy.work_start_hour() || hour >= policy.work_end_hour() {
        return false;
    }
    if !policy.preferred_hours().is_empty() && !policy.is_preferred_hour(hour) {
        return false;
    }
    true
}

/// Both predicates together.
pub fn is_eligible(
    slot: &CandidateSlot,
    intervals: &[BusyInterval],
    policy: &AvailabilityPolicy,
) -> bool {
    is_within_working_hours(slot, policy) && is_conflict_free(slot, intervals)
}

//! Scoring and top-N selection of eligible slots.
//!
//! ```text
//! score = -|hour - mid_day|
//!         - 0.5 * days_from_today
//!         + 10 if hour is a preferred hour
//!         +  5 if weekday is a preferred weekday
//! ```
//!
//! Selection sorts by score descending with a stable sort, so among equal scores the
//! earlier-enumerated (earlier in time) slot wins. The selected slots are then returned
//! in chronological order.

use chrono::NaiveDate;

use crate::enumerator::CandidateSlot;
use crate::policy::AvailabilityPolicy;

const DAY_DISTANCE_WEIGHT: f64 = 0.5;
const PREFERRED_HOUR_BONUS: f64 = 10.0;
const PREFERRED_WEEKDAY_BONUS: f64 = 5.0;

/// An eligible slot paired with its desirability score (higher is better).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSlot {
    pub slot: CandidateSlot,
    pub score: f64,
}

/// Score a single eligible slot. `today` is the civil date of "now" in the reference zone.
pub fn score_slot(slot: &CandidateSlot, policy: &AvailabilityPolicy, today: NaiveDate) -> f64 {
    let hour = slot.hour();
    let days_from_today = (slot.date() - today).num_days();

    let mut score = -(f64::from(hour) - policy.mid_day()).abs();
    score -= DAY_DISTANCE_WEIGHT * days_from_today as f64;
    if policy.is_preferred_hour(hour) {
        score += PREFERRED_HOUR_BONUS;
    }
    if policy.is_preferred_weekday(slot.weekday()) {
        score += PREFERRED_WEEKDAY_BONUS;
    }
    score
}

/// Pick the `count` best slots and return them in chronological order.
///
/// `scored` must be in enumeration (chronological) order for ties to resolve to the
/// earlier slot.
pub fn select_top(mut scored: Vec<ScoredSlot>, count: usize) -> Vec<CandidateSlot> {
    // `sort_by` is stable: equal scores keep their enumeration order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(count);

    let mut top: Vec<CandidateSlot> = scored.into_iter().map(|s| s.slot).collect();
    top.sort_by_key(CandidateSlot::start_utc);
    top
}

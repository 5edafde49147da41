//! Slot search orchestration: enumerate, filter, score, select.
//!
//! The search is a pure function of its inputs and the injected [`Clock`]. It performs
//! no I/O and holds no shared state, so concurrent searches with different inputs never
//! interfere. An empty result is a normal outcome, not an error.

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::enumerator::{enumerate, CandidateSlot};
use crate::filter::is_eligible;
use crate::interval::BusyInterval;
use crate::policy::AvailabilityPolicy;
use crate::scorer::{score_slot, select_top, ScoredSlot};

/// Find up to `count` open slots in `[window_start, window_end)`, in chronological order.
///
/// # Arguments
///
/// * `intervals` — Busy intervals from every calendar considered, already fetched.
/// * `window_start` — Start of the scan window; its reference-zone day is scanned.
/// * `window_end` — End of the scan window; its reference-zone day is not scanned.
/// * `policy` — Working hours, preferences and meeting duration.
/// * `count` — Maximum number of slots returned.
/// * `clock` — Supplies "now" for past-slot filtering and "today" for scoring.
pub fn find_available_slots(
    intervals: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    policy: &AvailabilityPolicy,
    count: usize,
    clock: &dyn Clock,
) -> Vec<CandidateSlot> {
    let scored = score_available_slots(intervals, window_start, window_end, policy, clock);
    let eligible = scored.len();
    let top = select_top(scored, count);

    tracing::info!(
        eligible,
        returned = top.len(),
        requested = count,
        "slot search finished"
    );
    top
}

/// Every eligible slot in the window with its score, in enumeration order.
pub fn score_available_slots(
    intervals: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    policy: &AvailabilityPolicy,
    clock: &dyn Clock,
) -> Vec<ScoredSlot> {
    let now = clock.now();
    let today = clock.today_in(policy.reference_timezone());

    let mut enumerated = 0usize;
    let mut scored = Vec::new();

    for slot in enumerate(window_start, window_end, policy, now) {
        enumerated += 1;
        if !is_eligible(&slot, intervals, policy) {
            continue;
        }
        let score = score_slot(&slot, policy, today);
        scored.push(ScoredSlot { slot, score });
    }

    let blocking = intervals.iter().filter(|i| i.blocks()).count();
    tracing::debug!(
        enumerated,
        rejected = enumerated - scored.len(),
        blocking_intervals = blocking,
        ignored_intervals = intervals.len() - blocking,
        "scanned candidate slots"
    );
    scored
}

/// The default scan window for `policy`: from `now` through `lookahead_days` days later.
///
/// The end saturates at the latest representable instant.
pub fn lookahead_window(
    policy: &AvailabilityPolicy,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = now
        .checked_add_signed(policy.lookahead())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (now, end)
}

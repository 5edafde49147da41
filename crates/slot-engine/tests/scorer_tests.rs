//! Tests for slot scoring and top-N selection.

use chrono::{Duration, NaiveDate, TimeZone};
use chrono_tz::Europe::Berlin;
use slot_engine::enumerator::CandidateSlot;
use slot_engine::policy::{AvailabilityPolicy, PolicySettings};
use slot_engine::scorer::{score_slot, select_top, ScoredSlot};

fn slot_on(day: u32, hour: u32, min: u32) -> CandidateSlot {
    let start = Berlin.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap();
    CandidateSlot {
        start,
        end: start + Duration::minutes(30),
    }
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn policy_with(settings: PolicySettings) -> AvailabilityPolicy {
    settings.build().unwrap()
}

fn scored(slot: CandidateSlot, score: f64) -> ScoredSlot {
    ScoredSlot { slot, score }
}

#[test]
fn midday_hours_score_highest() {
    let policy = policy_with(PolicySettings::default());

    assert_eq!(score_slot(&slot_on(16, 13, 0), &policy, monday()), 0.0);
    assert_eq!(score_slot(&slot_on(16, 13, 30), &policy, monday()), 0.0);
    assert_eq!(score_slot(&slot_on(16, 9, 0), &policy, monday()), -4.0);
    assert_eq!(score_slot(&slot_on(16, 16, 30), &policy, monday()), -3.0);
}

#[test]
fn fractional_midpoint_is_used_as_is() {
    // 9..16 has a midpoint of 12.5.
    let policy = policy_with(PolicySettings {
        work_end_hour: 16,
        ..PolicySettings::default()
    });

    assert_eq!(score_slot(&slot_on(16, 12, 0), &policy, monday()), -0.5);
    assert_eq!(score_slot(&slot_on(16, 13, 0), &policy, monday()), -0.5);
}

#[test]
fn later_days_lose_half_a_point_per_day() {
    let policy = policy_with(PolicySettings::default());

    assert_eq!(score_slot(&slot_on(17, 13, 0), &policy, monday()), -0.5);
    assert_eq!(score_slot(&slot_on(20, 13, 0), &policy, monday()), -2.0);
}

#[test]
fn preferred_hour_adds_ten() {
    let policy = policy_with(PolicySettings {
        work_end_hour: 15,
        preferred_hours: vec![14],
        ..PolicySettings::default()
    });

    // Midpoint 12: both hours are two away, only 14 gets the bonus.
    assert_eq!(score_slot(&slot_on(16, 10, 0), &policy, monday()), -2.0);
    assert_eq!(score_slot(&slot_on(16, 14, 0), &policy, monday()), 8.0);
}

#[test]
fn preferred_weekday_adds_five() {
    let policy = policy_with(PolicySettings {
        preferred_weekdays: vec![1],
        ..PolicySettings::default()
    });

    // Tuesday, one day out: -0.5 + 5.
    assert_eq!(score_slot(&slot_on(17, 13, 0), &policy, monday()), 4.5);
    assert_eq!(score_slot(&slot_on(16, 13, 0), &policy, monday()), 0.0);
}

#[test]
fn select_top_keeps_highest_scores_in_time_order() {
    let ranked = select_top(
        vec![
            scored(slot_on(16, 9, 0), -4.0),
            scored(slot_on(16, 11, 0), -2.0),
            scored(slot_on(16, 13, 0), 0.0),
            scored(slot_on(17, 10, 0), -3.5),
            scored(slot_on(17, 12, 0), -1.5),
        ],
        3,
    );

    let starts: Vec<_> = ranked.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![
            slot_on(16, 11, 0).start,
            slot_on(16, 13, 0).start,
            slot_on(17, 12, 0).start,
        ]
    );
}

#[test]
fn ties_go_to_the_earlier_enumerated_slot() {
    let ranked = select_top(
        vec![
            scored(slot_on(16, 13, 0), 0.0),
            scored(slot_on(16, 13, 30), 0.0),
            scored(slot_on(16, 12, 0), -1.0),
        ],
        1,
    );

    assert_eq!(ranked, vec![slot_on(16, 13, 0)]);
}

#[test]
fn count_larger_than_candidates_returns_all() {
    let ranked = select_top(
        vec![scored(slot_on(16, 15, 0), -2.0), scored(slot_on(16, 10, 0), -3.0)],
        10,
    );

    assert_eq!(ranked, vec![slot_on(16, 10, 0), slot_on(16, 15, 0)]);
}

#[test]
fn zero_count_returns_nothing() {
    assert!(select_top(vec![scored(slot_on(16, 13, 0), 0.0)], 0).is_empty());
}

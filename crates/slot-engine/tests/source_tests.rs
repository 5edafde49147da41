//! Tests for provider event normalization and multi-calendar aggregation.

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::event::{parse_instant, ProviderEvent};
use slot_engine::interval::{EventTime, Transparency};
use slot_engine::source::{collect_busy_intervals, FetchOutcome, JsonCalendarSource};
use slot_engine::{CalendarSource, SlotError};

const DUMP: &str = r#"{
  "calendars": {
    "primary": [
      {
        "summary": "Standup",
        "start": { "dateTime": "2026-03-16T10:00:00+01:00" },
        "end": { "dateTime": "2026-03-16T10:30:00+01:00" }
      },
      {
        "summary": "Focus time",
        "start": { "dateTime": "2026-03-16T14:00:00Z" },
        "end": { "dateTime": "2026-03-16T15:00:00Z" },
        "transparency": "transparent"
      },
      {
        "summary": "Offsite",
        "start": { "date": "2026-03-17" },
        "end": { "date": "2026-03-18" }
      },
      {
        "summary": "Last month",
        "start": { "dateTime": "2026-02-02T10:00:00Z" },
        "end": { "dateTime": "2026-02-02T11:00:00Z" }
      }
    ],
    "alice@example.com": [
      {
        "summary": "Review",
        "start": { "dateTime": "2026-03-16T12:00:00" },
        "end": { "dateTime": "2026-03-16T13:00:00" }
      }
    ]
  }
}"#;

fn window() -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    (
        Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 23, 0, 0, 0).unwrap(),
    )
}

fn event(json: &str) -> ProviderEvent {
    serde_json::from_str(json).unwrap()
}

#[test]
fn timed_event_with_offset_normalizes_to_utc() {
    let interval = event(
        r#"{"start":{"dateTime":"2026-03-16T10:00:00+01:00"},"end":{"dateTime":"2026-03-16T11:00:00+01:00"}}"#,
    )
    .to_interval();

    assert_eq!(
        interval.blocking_span(),
        Some((
            Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap(),
        ))
    );
}

#[test]
fn naive_timestamp_is_assumed_utc() {
    assert_eq!(
        parse_instant("2026-03-16T10:00:00", None),
        Some(Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap())
    );
    assert_eq!(
        parse_instant("2026-03-16T10:00:00.250", None),
        Some(Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap() + chrono::Duration::milliseconds(250))
    );
}

#[test]
fn naive_timestamp_uses_event_time_zone_when_given() {
    assert_eq!(
        parse_instant("2026-03-16T10:00:00", Some("Europe/Berlin")),
        Some(Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap())
    );
    // An unknown zone name falls back to UTC.
    assert_eq!(
        parse_instant("2026-03-16T10:00:00", Some("Nowhere/Special")),
        Some(Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap())
    );
}

#[test]
fn all_day_event_keeps_its_dates() {
    let interval = event(r#"{"start":{"date":"2026-03-17"},"end":{"date":"2026-03-18"}}"#).to_interval();

    assert_eq!(
        interval.start,
        Some(EventTime::AllDay(NaiveDate::from_ymd_opt(2026, 3, 17).unwrap()))
    );
    assert!(!interval.blocks());
}

#[test]
fn transparency_marker_is_read() {
    let interval = event(
        r#"{"start":{"dateTime":"2026-03-16T10:00:00Z"},"end":{"dateTime":"2026-03-16T11:00:00Z"},"transparency":"transparent"}"#,
    )
    .to_interval();
    assert_eq!(interval.transparency, Transparency::Transparent);

    let opaque = event(
        r#"{"start":{"dateTime":"2026-03-16T10:00:00Z"},"end":{"dateTime":"2026-03-16T11:00:00Z"},"transparency":"opaque"}"#,
    )
    .to_interval();
    assert_eq!(opaque.transparency, Transparency::Opaque);
}

#[test]
fn malformed_timestamps_become_non_blocking() {
    let garbled = event(
        r#"{"start":{"dateTime":"next tuesday"},"end":{"dateTime":"2026-03-16T11:00:00Z"}}"#,
    )
    .to_interval();
    assert_eq!(garbled.start, None);
    assert!(!garbled.blocks());

    let missing = event(r#"{"summary":"No times"}"#).to_interval();
    assert!(!missing.blocks());
}

#[test]
fn json_source_filters_to_the_requested_range() {
    let source = JsonCalendarSource::from_json_str(DUMP).unwrap();
    let (min, max) = window();

    let events = source.fetch_events("primary", min, max).unwrap();

    // Standup, focus time, offsite; last month's meeting is outside the range.
    assert_eq!(events.len(), 3);
    assert_eq!(events.iter().filter(|e| e.blocks()).count(), 1);
}

#[test]
fn json_source_reports_unknown_calendars() {
    let source = JsonCalendarSource::from_json_str(DUMP).unwrap();
    let (min, max) = window();

    let err = source.fetch_events("bob@example.com", min, max).unwrap_err();
    assert!(matches!(err, SlotError::CalendarUnavailable { ref calendar, .. } if calendar == "bob@example.com"));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = JsonCalendarSource::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, SlotError::EventParse(_)));
}

#[test]
fn aggregation_combines_calendars_and_skips_inaccessible_ones() {
    let source = JsonCalendarSource::from_json_str(DUMP).unwrap();
    let (min, max) = window();
    let colleagues = vec!["alice@example.com".to_string(), "bob@example.com".to_string()];

    let report = collect_busy_intervals(&source, "primary", &colleagues, min, max);

    assert_eq!(report.intervals.len(), 4);
    assert_eq!(report.calendars.len(), 3);
    assert_eq!(report.calendars[0].outcome, FetchOutcome::Fetched { events: 3 });
    assert_eq!(report.calendars[1].outcome, FetchOutcome::Fetched { events: 1 });
    assert!(matches!(report.calendars[2].outcome, FetchOutcome::Skipped { .. }));
    assert_eq!(report.skipped().collect::<Vec<_>>(), vec!["bob@example.com"]);
}

#[test]
fn aggregation_survives_a_missing_primary_calendar() {
    let source = JsonCalendarSource::default();
    let (min, max) = window();

    let report = collect_busy_intervals(&source, "primary", &[], min, max);

    assert!(report.intervals.is_empty());
    assert_eq!(report.skipped().count(), 1);
}

#[test]
fn json_source_loads_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, DUMP).unwrap();

    let source = JsonCalendarSource::from_path(&path).unwrap();
    assert_eq!(source.calendars.len(), 2);

    let missing = JsonCalendarSource::from_path(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(SlotError::Io(_))));
}

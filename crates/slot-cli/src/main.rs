//! `slotfinder` CLI — suggest open meeting times from calendar free/busy data.
//!
//! ## Usage
//!
//! ```sh
//! # Three best 30-minute slots over the next week (built-in defaults)
//! slotfinder find --events events.json
//!
//! # Include colleagues and prefer mornings on weekdays
//! slotfinder find -e events.json --colleague alice@example.com \
//!     --preferred-days 0,1,2,3,4 --preferred-hours 9,10,11
//!
//! # Reproducible search from a fixed instant, machine-readable output
//! slotfinder find -e events.json --now 2026-03-16T07:00:00Z --json
//!
//! # Print the effective configuration
//! slotfinder --config slotfinder.toml show-config
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use slot_engine::format::{format_slot_range, is_daylight_saving};
use slot_engine::search::{find_available_slots, lookahead_window};
use slot_engine::source::{collect_busy_intervals, FetchOutcome, FetchReport};
use slot_engine::{CandidateSlot, Clock, FixedClock, JsonCalendarSource, SearchConfig, SystemClock};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "slotfinder.toml";

#[derive(Parser)]
#[command(
    name = "slotfinder",
    version,
    about = "Find open meeting slots across calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); ./slotfinder.toml is used when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log search details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest available meeting slots
    Find {
        /// JSON event dump: {"calendars": {"<id>": [events...]}}
        #[arg(short, long)]
        events: PathBuf,
        /// Evaluate as if it were this instant (RFC 3339) instead of now
        #[arg(long, value_parser = parse_now)]
        now: Option<DateTime<Utc>>,
        /// Number of slots to suggest
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Your calendar id
        #[arg(long)]
        calendar: Option<String>,
        /// Colleague calendar id to include (repeatable)
        #[arg(long = "colleague")]
        colleagues: Vec<String>,
        /// Print slots as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        policy: PolicyOverrides,
    },
    /// Print the effective configuration as TOML
    ShowConfig {
        #[command(flatten)]
        policy: PolicyOverrides,
    },
}

/// Command-line overrides for the `[policy]` section of the configuration.
#[derive(Args)]
struct PolicyOverrides {
    /// Meeting duration in minutes
    #[arg(short, long)]
    duration: Option<u32>,
    /// Days to look ahead
    #[arg(long)]
    days: Option<u32>,
    /// First working hour (0-23)
    #[arg(long)]
    work_start: Option<u32>,
    /// Hour the working day ends (1-24)
    #[arg(long)]
    work_end: Option<u32>,
    /// Comma-separated weekdays to allow, 0 = Monday .. 6 = Sunday
    #[arg(long, value_delimiter = ',', conflicts_with = "any_day")]
    preferred_days: Option<Vec<u32>>,
    /// Clear any preferred weekdays from the configuration
    #[arg(long)]
    any_day: bool,
    /// Comma-separated hours of day to allow
    #[arg(long, value_delimiter = ',', conflicts_with = "any_hour")]
    preferred_hours: Option<Vec<u32>>,
    /// Clear any preferred hours from the configuration
    #[arg(long)]
    any_hour: bool,
    /// IANA zone that defines working hours (e.g. Europe/Berlin)
    #[arg(long)]
    timezone: Option<String>,
}

impl PolicyOverrides {
    fn apply(self, config: &mut SearchConfig) {
        let policy = &mut config.policy;
        if let Some(minutes) = self.duration {
            policy.meeting_duration_minutes = minutes;
        }
        if let Some(days) = self.days {
            policy.lookahead_days = days;
        }
        if let Some(hour) = self.work_start {
            policy.work_start_hour = hour;
        }
        if let Some(hour) = self.work_end {
            policy.work_end_hour = hour;
        }
        if self.any_day {
            policy.preferred_weekdays.clear();
        } else if let Some(days) = self.preferred_days {
            policy.preferred_weekdays = days;
        }
        if self.any_hour {
            policy.preferred_hours.clear();
        } else if let Some(hours) = self.preferred_hours {
            policy.preferred_hours = hours;
        }
        if let Some(zone) = self.timezone {
            policy.reference_timezone = zone;
        }
    }
}

/// JSON view of one suggested slot.
#[derive(Serialize)]
struct SlotView {
    start: String,
    end: String,
    label: String,
    daylight_saving: bool,
}

impl From<&CandidateSlot> for SlotView {
    fn from(slot: &CandidateSlot) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
            label: format_slot_range(slot),
            daylight_saving: is_daylight_saving(slot),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Find {
            events,
            now,
            count,
            calendar,
            colleagues,
            json,
            policy,
        } => {
            policy.apply(&mut config);
            if let Some(count) = count {
                config.slot_count = count;
            }
            if let Some(calendar) = calendar {
                config.calendar_id = calendar;
            }
            if !colleagues.is_empty() {
                config.colleague_calendars = colleagues;
            }

            let clock: Box<dyn Clock> = match now {
                Some(instant) => Box::new(FixedClock(instant)),
                None => Box::new(SystemClock),
            };
            run_find(&config, &events, clock.as_ref(), json)?;
        }
        Commands::ShowConfig { policy } => {
            policy.apply(&mut config);
            config
                .policy
                .build()
                .context("Configuration does not describe a valid policy")?;
            let toml = toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{}", toml);
        }
    }

    Ok(())
}

fn run_find(config: &SearchConfig, events: &Path, clock: &dyn Clock, json: bool) -> Result<()> {
    let policy = config
        .policy
        .build()
        .context("Configuration does not describe a valid policy")?;
    let source = JsonCalendarSource::from_path(events)
        .with_context(|| format!("Failed to read event data: {}", events.display()))?;

    let (window_start, window_end) = lookahead_window(&policy, clock.now());
    tracing::debug!(
        %window_start,
        %window_end,
        calendar = %config.calendar_id,
        colleagues = config.colleague_calendars.len(),
        "searching lookahead window"
    );
    let report = collect_busy_intervals(
        &source,
        &config.calendar_id,
        &config.colleague_calendars,
        window_start,
        window_end,
    );
    tracing::debug!(
        intervals = report.intervals.len(),
        skipped = report.skipped().count(),
        "collected busy intervals"
    );

    let slots = find_available_slots(
        &report.intervals,
        window_start,
        window_end,
        &policy,
        config.slot_count,
        clock,
    );

    if json {
        let views: Vec<SlotView> = slots.iter().map(SlotView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    print_fetch_summary(config, &report);

    if slots.is_empty() {
        println!(
            "No available {}-minute slots found in your working hours for the next {} days.",
            policy.meeting_duration_minutes(),
            policy.lookahead_days()
        );
        println!("Consider relaxing your working hours or preferences, or looking further ahead.");
        return Ok(());
    }

    println!(
        "Here are {} suggested times for your {}-minute meeting ({}):",
        slots.len(),
        policy.meeting_duration_minutes(),
        policy.reference_timezone().name()
    );
    for (i, slot) in slots.iter().enumerate() {
        println!("{}. {}", i + 1, format_slot_range(slot));
    }

    Ok(())
}

fn print_fetch_summary(config: &SearchConfig, report: &FetchReport) {
    println!(
        "Found {} events in the next {} days.",
        report.intervals.len(),
        config.policy.lookahead_days
    );
    let (primary, colleagues) = match report.calendars.split_first() {
        Some((primary, colleagues)) => (primary, colleagues),
        None => return,
    };
    if let FetchOutcome::Skipped { .. } = primary.outcome {
        println!(
            "Calendar '{}' could not be read; continuing without it.",
            primary.calendar_id
        );
    }
    if colleagues.is_empty() {
        return;
    }

    println!("Colleagues considered ({}):", colleagues.len());
    for fetch in colleagues {
        match &fetch.outcome {
            FetchOutcome::Fetched { events } => {
                println!("  - {}: {} events", fetch.calendar_id, events);
            }
            FetchOutcome::Skipped { .. } => {
                println!("  - {}: no access, skipped", fetch.calendar_id);
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    tracing::debug!(path = ?path, "resolving configuration");
    match path {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => SearchConfig::load_or_default(Some(Path::new(DEFAULT_CONFIG_FILE)))
            .context("Failed to load ./slotfinder.toml"),
    }
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

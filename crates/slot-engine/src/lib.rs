//! # slot-engine
//!
//! Timezone-correct meeting slot search over calendar free/busy data.
//!
//! Given the busy intervals of one or more calendars and an [`AvailabilityPolicy`]
//! (working hours, preferred days and hours, meeting duration), the engine walks a scan
//! window in a fixed reference zone, drops candidates that conflict or fall outside the
//! policy, scores the survivors and returns the best few in chronological order.
//!
//! ## Modules
//!
//! - [`interval`] — Busy intervals and the "does this really block" predicate
//! - [`policy`] — Availability policy settings and validation
//! - [`enumerator`] — Candidate slots across the scan window, DST-aware
//! - [`filter`] — Conflict and working-hour predicates
//! - [`scorer`] — Desirability scores and top-N selection
//! - [`search`] — One-call slot search
//! - [`clock`] — Injectable "now"
//! - [`event`] — Provider event records → busy intervals
//! - [`source`] — Calendar data sources and multi-calendar aggregation
//! - [`config`] — TOML search configuration
//! - [`format`] — Human-readable slot rendering
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod interval;
pub mod policy;
pub mod scorer;
pub mod search;
pub mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SearchConfig;
pub use enumerator::CandidateSlot;
pub use error::SlotError;
pub use interval::BusyInterval;
pub use policy::{AvailabilityPolicy, PolicySettings};
pub use search::find_available_slots;
pub use source::{collect_busy_intervals, CalendarSource, JsonCalendarSource};

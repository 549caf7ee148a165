//! # kalends-periods
//!
//! Recurring calendar periods for report generation: partially specified
//! dates, calendar-aware durations, ranges between partial dates, and the
//! steppable interval engine that buckets a chronological stream of
//! records into aligned periods.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `DateDuration` — a relative span of calendar time.
pub mod duration;

/// `DateInterval` — the steppable period engine.
pub mod interval;

/// `DateRange` — a span between two partially specified endpoints.
pub mod range;

/// `DateSpecifier` — a partially specified calendar date.
pub mod specifier;

/// `Window` — the set of dates an interval covers.
pub mod window;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use duration::{DateDuration, Quantum};
pub use interval::{DateInterval, Periods};
pub use range::DateRange;
pub use specifier::{DateSpecifier, DateTraits};
pub use window::Window;

// The chrono vocabulary this crate's public API speaks.
pub use chrono::{Month, NaiveDate, Weekday};

//! Clock configuration.
//!
//! [`Clock`] carries the two pieces of ambient calendar context the interval
//! engine needs: what "today" is, and which weekday starts a week.  It is an
//! ordinary value passed at construction time rather than a process-wide
//! singleton, so two intervals in the same process can run against different
//! clocks and tests can pin a fixed date.
//!
//! When no override is set, `today()` samples the system clock on every
//! call; two calls that straddle midnight may legitimately observe
//! different days.

use chrono::{Local, NaiveDate, Weekday};

/// Ambient calendar context for period resolution.
///
/// Holds an optional fixed "today" and the configured start-of-week.  The
/// default clock follows the local system date and starts weeks on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    today_override: Option<NaiveDate>,
    start_of_week: Weekday,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            today_override: None,
            start_of_week: Weekday::Sun,
        }
    }
}

impl Clock {
    /// A clock that follows the system date, weeks starting on Sunday.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock pinned to a fixed date, for deterministic runs.
    pub fn fixed(today: NaiveDate) -> Self {
        Self {
            today_override: Some(today),
            ..Self::default()
        }
    }

    /// Pin "today" to a fixed date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today_override = Some(today);
        self
    }

    /// Set the weekday on which weeks begin.
    pub fn with_start_of_week(mut self, weekday: Weekday) -> Self {
        self.start_of_week = weekday;
        self
    }

    /// The current date: the override if pinned, otherwise the local
    /// system date sampled now.
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// The pinned date, if any.
    pub fn today_override(&self) -> Option<NaiveDate> {
        self.today_override
    }

    /// The weekday on which weeks begin.
    pub fn start_of_week(&self) -> Weekday {
        self.start_of_week
    }
}

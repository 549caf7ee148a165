//! `DateDuration` — a relative span of calendar time in a [`Quantum`].

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use kalends_core::errors::{Error, Result};

/// The granularity of a [`DateDuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantum {
    /// Calendar days.
    Days,
    /// Calendar weeks (7 days).
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar quarters (3 months).
    Quarters,
    /// Calendar years (12 months).
    Years,
}

impl Quantum {
    /// Singular unit name, as used in period descriptions.
    pub fn unit_name(self) -> &'static str {
        match self {
            Quantum::Days => "day",
            Quantum::Weeks => "week",
            Quantum::Months => "month",
            Quantum::Quarters => "quarter",
            Quantum::Years => "year",
        }
    }
}

impl std::fmt::Display for Quantum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.unit_name())
    }
}

/// A relative span of calendar time: a non-negative length in a single
/// [`Quantum`].
///
/// A duration has no anchor of its own; direction comes from choosing
/// [`add`](DateDuration::add) or [`subtract`](DateDuration::subtract).
/// Month-or-coarser steps are calendar-aware, so "one month after
/// January 31" clamps to the end of February.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateDuration {
    /// Number of quanta.
    pub length: u32,
    /// The granularity of the span.
    pub quantum: Quantum,
}

impl DateDuration {
    /// Create a new duration.
    pub fn new(length: u32, quantum: Quantum) -> Self {
        Self { length, quantum }
    }

    /// Move `date` forward by this span.
    ///
    /// # Errors
    /// Fails when the result leaves the supported date range.
    pub fn add(self, date: NaiveDate) -> Result<NaiveDate> {
        let moved = match self.quantum {
            Quantum::Days => date.checked_add_days(Days::new(u64::from(self.length))),
            Quantum::Weeks => date.checked_add_days(Days::new(7 * u64::from(self.length))),
            Quantum::Months => date.checked_add_months(Months::new(self.length)),
            Quantum::Quarters => {
                date.checked_add_months(Months::new(self.length.saturating_mul(3)))
            }
            Quantum::Years => date.checked_add_months(Months::new(self.length.saturating_mul(12))),
        };
        moved.ok_or_else(|| {
            Error::MalformedPeriod(format!("{date} + {self} leaves the supported date range"))
        })
    }

    /// Move `date` backward by this span.
    ///
    /// # Errors
    /// Fails when the result leaves the supported date range.
    pub fn subtract(self, date: NaiveDate) -> Result<NaiveDate> {
        let moved = match self.quantum {
            Quantum::Days => date.checked_sub_days(Days::new(u64::from(self.length))),
            Quantum::Weeks => date.checked_sub_days(Days::new(7 * u64::from(self.length))),
            Quantum::Months => date.checked_sub_months(Months::new(self.length)),
            Quantum::Quarters => {
                date.checked_sub_months(Months::new(self.length.saturating_mul(3)))
            }
            Quantum::Years => date.checked_sub_months(Months::new(self.length.saturating_mul(12))),
        };
        moved.ok_or_else(|| {
            Error::MalformedPeriod(format!("{date} - {self} leaves the supported date range"))
        })
    }

    /// Human-readable description, e.g. `"1 week"` or `"2 months"`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// The latest `quantum` boundary on or before `date`.
    ///
    /// Days have a boundary at every date; weeks begin on `start_of_week`;
    /// months on the 1st; quarters on the 1st of January, April, July, and
    /// October; years on January 1.  A boundary date maps to itself.
    pub fn nearest_boundary(
        date: NaiveDate,
        quantum: Quantum,
        start_of_week: Weekday,
    ) -> Result<NaiveDate> {
        let boundary = match quantum {
            Quantum::Days => Some(date),
            Quantum::Weeks => {
                let back = (7 + date.weekday().num_days_from_sunday()
                    - start_of_week.num_days_from_sunday())
                    % 7;
                date.checked_sub_days(Days::new(u64::from(back)))
            }
            Quantum::Months => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            Quantum::Quarters => {
                let month = date.month() - (date.month() - 1) % 3;
                NaiveDate::from_ymd_opt(date.year(), month, 1)
            }
            Quantum::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        };
        boundary.ok_or_else(|| {
            Error::MalformedPeriod(format!(
                "no {} boundary on or before {date}",
                quantum.unit_name()
            ))
        })
    }
}

impl std::fmt::Display for DateDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.length, self.quantum.unit_name())?;
        if self.length != 1 {
            f.write_str("s")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for DateDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DateDuration({self})")
    }
}

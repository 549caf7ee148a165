//! `Window` — the set of dates an interval is asked to cover.

use chrono::NaiveDate;
use kalends_core::errors::Result;
use kalends_core::Year;

use crate::duration::DateDuration;
use crate::range::DateRange;
use crate::specifier::DateSpecifier;

/// The set of dates an interval covers: a single partially specified date
/// or a range between two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// All dates matching one partially specified date.
    Specifier(DateSpecifier),
    /// All dates between two optional bounds.
    Range(DateRange),
}

impl Window {
    /// The concrete lower edge, if the window has one.
    ///
    /// # Errors
    /// Fails when a present bound cannot be resolved.
    pub fn begin(&self, disambiguation_year: Option<Year>) -> Result<Option<NaiveDate>> {
        match self {
            Window::Specifier(spec) => spec.begin(disambiguation_year).map(Some),
            Window::Range(range) => range.begin(disambiguation_year),
        }
    }

    /// The concrete exclusive upper edge, if the window has one.
    ///
    /// # Errors
    /// Fails when a present bound cannot be resolved.
    pub fn end(&self, disambiguation_year: Option<Year>) -> Result<Option<NaiveDate>> {
        match self {
            Window::Specifier(spec) => spec.end(disambiguation_year).map(Some),
            Window::Range(range) => range.end(disambiguation_year),
        }
    }

    /// Whether `date` falls inside the window.
    ///
    /// # Errors
    /// Fails when the window cannot be resolved.
    pub fn is_within(&self, date: NaiveDate, disambiguation_year: Option<Year>) -> Result<bool> {
        match self {
            Window::Specifier(spec) => spec.is_within(date, disambiguation_year),
            Window::Range(range) => range.is_within(date, disambiguation_year),
        }
    }

    /// The step size the window implies: a specifier's granularity, nothing
    /// for a range.
    pub fn implied_duration(&self) -> Option<DateDuration> {
        match self {
            Window::Specifier(spec) => spec.implied_duration(),
            Window::Range(_) => None,
        }
    }
}

impl From<DateSpecifier> for Window {
    fn from(spec: DateSpecifier) -> Self {
        Window::Specifier(spec)
    }
}

impl From<DateRange> for Window {
    fn from(range: DateRange) -> Self {
        Window::Range(range)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::Specifier(spec) => write!(f, "in {spec}"),
            Window::Range(range) => write!(f, "{range}"),
        }
    }
}

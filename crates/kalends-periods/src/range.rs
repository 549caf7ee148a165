//! `DateRange` — a span between two partially specified endpoints.

use chrono::NaiveDate;
use kalends_core::errors::Result;
use kalends_core::Year;

use crate::specifier::DateSpecifier;

/// A span between two optional [`DateSpecifier`] bounds.
///
/// A missing bound leaves that side open.  The upper bound is exclusive by
/// default: "from 2020 to 2021" ends where 2021 begins.  When marked
/// inclusive the upper bound contributes its whole span instead, so
/// "from 2020 to 2021 inclusive" runs through the end of 2021.
///
/// Bound consistency (lower at or before upper) is not enforced at
/// construction; the interval engine validates it when the range is
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    lower: Option<DateSpecifier>,
    upper: Option<DateSpecifier>,
    upper_inclusive: bool,
}

impl DateRange {
    /// A range between two optional bounds, upper bound exclusive.
    pub fn new(lower: Option<DateSpecifier>, upper: Option<DateSpecifier>) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive: false,
        }
    }

    /// Make the upper bound inclusive (or exclusive again).
    pub fn inclusive(mut self, flag: bool) -> Self {
        self.upper_inclusive = flag;
        self
    }

    /// The lower bound, if present.
    pub fn lower(&self) -> Option<&DateSpecifier> {
        self.lower.as_ref()
    }

    /// The upper bound, if present.
    pub fn upper(&self) -> Option<&DateSpecifier> {
        self.upper.as_ref()
    }

    /// Whether the upper bound contributes its whole span.
    pub fn is_upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    /// The concrete lower edge, if a lower bound exists.
    ///
    /// # Errors
    /// Fails when the lower bound cannot be resolved.
    pub fn begin(&self, disambiguation_year: Option<Year>) -> Result<Option<NaiveDate>> {
        self.lower
            .map(|spec| spec.begin(disambiguation_year))
            .transpose()
    }

    /// The concrete exclusive upper edge, if an upper bound exists.
    ///
    /// An inclusive upper bound ends one past its own span; an exclusive
    /// one ends where its span begins.
    ///
    /// # Errors
    /// Fails when the upper bound cannot be resolved.
    pub fn end(&self, disambiguation_year: Option<Year>) -> Result<Option<NaiveDate>> {
        self.upper
            .map(|spec| {
                if self.upper_inclusive {
                    spec.end(disambiguation_year)
                } else {
                    spec.begin(disambiguation_year)
                }
            })
            .transpose()
    }

    /// Whether `date` falls between the bounds; a missing bound is open.
    ///
    /// # Errors
    /// Fails when a present bound cannot be resolved.
    pub fn is_within(&self, date: NaiveDate, disambiguation_year: Option<Year>) -> Result<bool> {
        if let Some(begin) = self.begin(disambiguation_year)? {
            if date < begin {
                return Ok(false);
            }
        }
        if let Some(end) = self.end(disambiguation_year)? {
            if date >= end {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => write!(f, "from {lower} to {upper}"),
            (Some(lower), None) => write!(f, "from {lower}"),
            (None, Some(upper)) => write!(f, "until {upper}"),
            (None, None) => f.write_str("any date"),
        }
    }
}

//! `DateSpecifier` — a partially specified calendar date.

use chrono::{Datelike, Days, Month, NaiveDate, Weekday};
use kalends_core::errors::{Error, Result};
use kalends_core::{ensure, fail, DayOfMonth, Year};

use crate::duration::{DateDuration, Quantum};

/// Selects which calendar fields to copy when building a specifier from a
/// concrete date.
///
/// The weekday is never copied; a trait mask only ever selects the year,
/// month, and day fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTraits {
    /// Copy the year field.
    pub has_year: bool,
    /// Copy the month field.
    pub has_month: bool,
    /// Copy the day field.
    pub has_day: bool,
}

impl DateTraits {
    /// Select all three calendar fields.
    pub fn all() -> Self {
        Self {
            has_year: true,
            has_month: true,
            has_day: true,
        }
    }
}

/// A partially specified calendar date.
///
/// Any subset of year, month, day, and weekday may be present; absent
/// fields make the specifier name a recurring or ambiguous moment
/// ("March" names a March in some year, "day 10" the 10th of some month).
/// Resolution against an optional disambiguation year turns it into the
/// concrete half-open span `[begin, end)`.
///
/// A missing year is never silently read as the current year; resolution
/// fails instead, and only the interval engine injects a reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSpecifier {
    year: Option<Year>,
    month: Option<Month>,
    day: Option<DayOfMonth>,
    weekday: Option<Weekday>,
}

impl DateSpecifier {
    /// A specifier with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy all calendar fields of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_date_with_traits(date, DateTraits::all())
    }

    /// Copy the calendar fields of `date` selected by `traits`.
    pub fn from_date_with_traits(date: NaiveDate, traits: DateTraits) -> Self {
        Self {
            year: traits.has_year.then(|| date.year()),
            month: traits
                .has_month
                .then(|| Month::try_from(date.month() as u8).expect("chrono months are 1-12")),
            day: traits.has_day.then(|| date.day()),
            weekday: None,
        }
    }

    /// Set the year field.
    pub fn with_year(mut self, year: Year) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the month field.
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the day-of-month field.
    pub fn with_day(mut self, day: DayOfMonth) -> Self {
        self.day = Some(day);
        self
    }

    /// Set the weekday field.
    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// The year field, if present.
    pub fn year(&self) -> Option<Year> {
        self.year
    }

    /// The month field, if present.
    pub fn month(&self) -> Option<Month> {
        self.month
    }

    /// The day-of-month field, if present.
    pub fn day(&self) -> Option<DayOfMonth> {
        self.day
    }

    /// The weekday field, if present.
    pub fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    /// The earliest concrete date matching every present field.
    ///
    /// `disambiguation_year` stands in for a missing year field; absent
    /// month and day fields resolve to their earliest value.  A weekday
    /// field without a day advances to the first matching weekday on or
    /// after that earliest date; a weekday alongside a day must agree with
    /// the date the other fields name.
    ///
    /// # Errors
    /// Fails when no year is derivable, when the fields name an impossible
    /// calendar date, or when day and weekday contradict each other.
    pub fn begin(&self, disambiguation_year: Option<Year>) -> Result<NaiveDate> {
        let year = match self.year.or(disambiguation_year) {
            Some(y) => y,
            None => fail!("specifier has no year and no disambiguation year was given"),
        };
        let month = self.month.map_or(1, |m| m.number_from_month());
        let day = self.day.unwrap_or(1);
        let base = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(d) => d,
            None => fail!("{year:04}-{month:02}-{day:02} is not a valid calendar date"),
        };
        match (self.day, self.weekday) {
            (Some(_), Some(weekday)) => {
                ensure!(
                    base.weekday() == weekday,
                    "{base} falls on {} but the specifier names {weekday}",
                    base.weekday()
                );
                Ok(base)
            }
            (None, Some(weekday)) => {
                let forward = (7 + weekday.num_days_from_sunday()
                    - base.weekday().num_days_from_sunday())
                    % 7;
                base.checked_add_days(Days::new(u64::from(forward)))
                    .ok_or_else(|| {
                        Error::MalformedPeriod(format!(
                            "no {weekday} on or after {base} in the supported date range"
                        ))
                    })
            }
            _ => Ok(base),
        }
    }

    /// One past the latest concrete date matching every present field, so
    /// that `[begin, end)` covers exactly the span the specifier names.
    ///
    /// # Errors
    /// Fails for a field-less specifier, which pins down no granularity,
    /// and for anything [`begin`](DateSpecifier::begin) rejects.
    pub fn end(&self, disambiguation_year: Option<Year>) -> Result<NaiveDate> {
        match self.implied_duration() {
            Some(step) => step.add(self.begin(disambiguation_year)?),
            None => fail!("specifier with no fields spans no bounded period"),
        }
    }

    /// Whether `date` falls inside the span this specifier names.
    ///
    /// # Errors
    /// Fails when the specifier cannot be resolved.
    pub fn is_within(&self, date: NaiveDate, disambiguation_year: Option<Year>) -> Result<bool> {
        Ok(self.begin(disambiguation_year)? <= date && date < self.end(disambiguation_year)?)
    }

    /// The granularity the finest present field pins down: a day when a
    /// day or weekday is present, else a month, else a year, else nothing.
    pub fn implied_duration(&self) -> Option<DateDuration> {
        if self.day.is_some() || self.weekday.is_some() {
            Some(DateDuration::new(1, Quantum::Days))
        } else if self.month.is_some() {
            Some(DateDuration::new(1, Quantum::Months))
        } else if self.year.is_some() {
            Some(DateDuration::new(1, Quantum::Years))
        } else {
            None
        }
    }
}

impl std::fmt::Display for DateSpecifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut wrote = false;
        if let Some(year) = self.year {
            write!(f, "year {year}")?;
            wrote = true;
        }
        if let Some(month) = self.month {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "month {}", month.name())?;
            wrote = true;
        }
        if let Some(day) = self.day {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "day {day}")?;
            wrote = true;
        }
        if let Some(weekday) = self.weekday {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "weekday {weekday}")?;
            wrote = true;
        }
        if !wrote {
            f.write_str("any date")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_month_resolves_to_calendar_month() {
        let spec = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::March);
        assert_eq!(spec.begin(None).unwrap(), date(2021, 3, 1));
        assert_eq!(spec.end(None).unwrap(), date(2021, 4, 1));
        assert!(spec.is_within(date(2021, 3, 31), None).unwrap());
        assert!(!spec.is_within(date(2021, 4, 1), None).unwrap());
    }

    #[test]
    fn year_only_resolves_to_calendar_year() {
        let spec = DateSpecifier::new().with_year(2021);
        assert_eq!(spec.begin(None).unwrap(), date(2021, 1, 1));
        assert_eq!(spec.end(None).unwrap(), date(2022, 1, 1));
    }

    #[test]
    fn full_date_spans_one_day() {
        let spec = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::March)
            .with_day(10);
        assert_eq!(spec.begin(None).unwrap(), date(2021, 3, 10));
        assert_eq!(spec.end(None).unwrap(), date(2021, 3, 11));
    }

    #[test]
    fn missing_year_needs_disambiguation() {
        let spec = DateSpecifier::new().with_month(Month::March);
        assert!(spec.begin(None).is_err(), "no year anywhere must fail");
        assert_eq!(spec.begin(Some(2021)).unwrap(), date(2021, 3, 1));
        assert_eq!(spec.end(Some(2021)).unwrap(), date(2021, 4, 1));
    }

    #[test]
    fn explicit_year_wins_over_disambiguation() {
        let spec = DateSpecifier::new().with_year(2019);
        assert_eq!(spec.begin(Some(2021)).unwrap(), date(2019, 1, 1));
    }

    #[test]
    fn day_only_resolves_in_january() {
        let spec = DateSpecifier::new().with_day(15);
        assert_eq!(spec.begin(Some(2021)).unwrap(), date(2021, 1, 15));
        assert_eq!(spec.end(Some(2021)).unwrap(), date(2021, 1, 16));
    }

    #[test]
    fn weekday_advances_to_first_match() {
        // 2021-01-01 is a Friday; the first Monday of 2021 is Jan 4.
        let spec = DateSpecifier::new().with_weekday(Weekday::Mon);
        assert_eq!(spec.begin(Some(2021)).unwrap(), date(2021, 1, 4));
        assert_eq!(spec.end(Some(2021)).unwrap(), date(2021, 1, 5));

        // 2021-03-01 is a Monday; the first Tuesday of March is the 2nd.
        let spec = DateSpecifier::new()
            .with_month(Month::March)
            .with_weekday(Weekday::Tue);
        assert_eq!(spec.begin(Some(2021)).unwrap(), date(2021, 3, 2));
    }

    #[test]
    fn weekday_on_the_base_date_stays_put() {
        // 2021-02-01 is itself a Monday.
        let spec = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::February)
            .with_weekday(Weekday::Mon);
        assert_eq!(spec.begin(None).unwrap(), date(2021, 2, 1));
    }

    #[test]
    fn day_and_weekday_must_agree() {
        // 2021-03-10 is a Wednesday.
        let base = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::March)
            .with_day(10);
        assert_eq!(
            base.with_weekday(Weekday::Wed).begin(None).unwrap(),
            date(2021, 3, 10)
        );
        assert!(base.with_weekday(Weekday::Thu).begin(None).is_err());
    }

    #[test]
    fn impossible_dates_are_rejected() {
        let spec = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::April)
            .with_day(31);
        assert!(spec.begin(None).is_err());
        let spec = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::February)
            .with_day(29);
        assert!(spec.begin(None).is_err(), "2021 is not a leap year");
    }

    #[test]
    fn empty_specifier_has_no_span() {
        let spec = DateSpecifier::new();
        assert!(spec.begin(None).is_err());
        assert_eq!(spec.begin(Some(2021)).unwrap(), date(2021, 1, 1));
        assert!(spec.end(Some(2021)).is_err());
        assert_eq!(spec.implied_duration(), None);
    }

    #[test]
    fn implied_durations_follow_the_finest_field() {
        let day = DateDuration::new(1, Quantum::Days);
        assert_eq!(
            DateSpecifier::new().with_day(10).implied_duration(),
            Some(day)
        );
        assert_eq!(
            DateSpecifier::new()
                .with_weekday(Weekday::Fri)
                .implied_duration(),
            Some(day)
        );
        assert_eq!(
            DateSpecifier::new()
                .with_month(Month::July)
                .implied_duration(),
            Some(DateDuration::new(1, Quantum::Months))
        );
        assert_eq!(
            DateSpecifier::new().with_year(2021).implied_duration(),
            Some(DateDuration::new(1, Quantum::Years))
        );
    }

    #[test]
    fn from_date_copies_masked_fields() {
        let d = date(2021, 3, 10);
        let full = DateSpecifier::from_date(d);
        assert_eq!(full.year(), Some(2021));
        assert_eq!(full.month(), Some(Month::March));
        assert_eq!(full.day(), Some(10));
        assert_eq!(full.weekday(), None, "weekday is never copied");

        let monthly = DateSpecifier::from_date_with_traits(
            d,
            DateTraits {
                has_year: true,
                has_month: true,
                has_day: false,
            },
        );
        assert_eq!(monthly.begin(None).unwrap(), date(2021, 3, 1));
        assert_eq!(monthly.end(None).unwrap(), date(2021, 4, 1));
    }

    #[test]
    fn display_lists_present_fields() {
        let spec = DateSpecifier::new()
            .with_year(2021)
            .with_month(Month::March);
        assert_eq!(spec.to_string(), "year 2021 month March");
        assert_eq!(DateSpecifier::new().to_string(), "any date");
        assert_eq!(
            DateSpecifier::new().with_weekday(Weekday::Tue).to_string(),
            "weekday Tue"
        );
    }
}

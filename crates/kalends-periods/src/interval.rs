//! `DateInterval` — the steppable period engine.
//!
//! An interval bundles a [`Window`] of dates to cover with a
//! [`DateDuration`] step size and walks the window one aligned period at a
//! time.  Construction is lazy: nothing is resolved until
//! [`stabilize`](DateInterval::stabilize) turns the window into concrete
//! boundaries, snaps the start back to the duration's quantum boundary,
//! and caches the current period.  From there
//! [`find_period`](DateInterval::find_period) buckets incoming dates and
//! [`advance`](DateInterval::advance) steps to the next period.

use chrono::{Datelike, NaiveDate};
use kalends_core::errors::{Error, Result};
use kalends_core::{ensure, fail, Clock, Year};

use crate::duration::DateDuration;
use crate::window::Window;

/// A recurring period engine over an optional window of dates.
///
/// The engine is forward-only: dates are expected to arrive in
/// chronological order, and [`find_period`](DateInterval::find_period)
/// never rewinds behind the current period.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateInterval {
    window: Option<Window>,
    duration: Option<DateDuration>,
    clock: Clock,
    start: Option<NaiveDate>,
    finish: Option<NaiveDate>,
    aligned: bool,
    next: Option<NaiveDate>,
    end_of_duration: Option<NaiveDate>,
}

impl DateInterval {
    /// An empty engine: no window, no duration, default clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window of dates the periods must cover.
    pub fn with_window(mut self, window: impl Into<Window>) -> Self {
        self.window = Some(window.into());
        self
    }

    /// Set the step size explicitly, overriding the window's implication.
    pub fn with_duration(mut self, duration: DateDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Run against a specific clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// The window constraining this interval, if any.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// The configured or derived step size.
    pub fn duration(&self) -> Option<DateDuration> {
        self.duration
    }

    /// The clock this engine reads.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start of the current period, once stabilized.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Exclusive upper bound of the whole interval, when the window has one.
    pub fn finish(&self) -> Option<NaiveDate> {
        self.finish
    }

    /// Whether the start has been snapped to a quantum boundary.
    pub fn is_aligned(&self) -> bool {
        self.aligned
    }

    /// Exclusive end of the current period, once stabilized.
    pub fn end_of_duration(&self) -> Option<NaiveDate> {
        self.end_of_duration
    }

    /// Whether stabilization produced a concrete current period.
    pub fn is_valid(&self) -> bool {
        self.start.is_some()
    }

    /// The last date inside the current period, one before
    /// [`end_of_duration`](DateInterval::end_of_duration).
    pub fn inclusive_end(&self) -> Option<NaiveDate> {
        self.end_of_duration.and_then(|end| end.pred_opt())
    }

    /// Narrow equality on position alone: `true` when both engines have
    /// the same resolved start, or neither has one.  Window, duration,
    /// and clock are not compared; use `==` for structural equality.
    pub fn same_start(&self, other: &DateInterval) -> bool {
        self.start == other.start
    }

    // ── Resolution ───────────────────────────────────────────────────────────

    /// Resolve the window into concrete boundaries and align the start.
    ///
    /// `reference` disambiguates year-less windows and seeds the first
    /// period; it defaults to the clock's today.  The window's edges land
    /// in `start` and `finish`, a missing duration is taken from the
    /// window's implication, and when a duration is known the start snaps
    /// back to the latest quantum boundary on or before it.  Once aligned,
    /// further calls only refresh the cached period end.
    ///
    /// # Errors
    /// Fails when the window cannot be resolved against the reference
    /// year or its bounds contradict each other.
    pub fn stabilize(&mut self, reference: Option<NaiveDate>) -> Result<()> {
        if !self.aligned {
            let reference = reference.unwrap_or_else(|| self.clock.today());
            let reference_year = Some(reference.year());

            if let Some(window) = &self.window {
                if self.start.is_none() {
                    self.start = window.begin(reference_year)?;
                }
                if self.finish.is_none() {
                    self.finish = window.end(reference_year)?;
                }
                if self.duration.is_none() {
                    self.duration = window.implied_duration();
                }
                if let (Some(start), Some(finish)) = (self.start, self.finish) {
                    ensure!(
                        start <= finish,
                        "window bounds are contradictory: {start} is after {finish}"
                    );
                }
            }

            if let Some(duration) = self.duration {
                let seed = self.start.unwrap_or(reference);
                self.start = Some(DateDuration::nearest_boundary(
                    seed,
                    duration.quantum,
                    self.clock.start_of_week(),
                )?);
                self.aligned = true;
            }
        }
        self.resolve_end()
    }

    /// Recompute the cached end of the current period.
    ///
    /// Must run whenever `start` changes; the other mutating operations
    /// call it themselves.  `end_of_duration` is always exactly one
    /// duration past `start` and is never cut short at `finish`; a final
    /// period may overhang the window, and display layers cap it with
    /// [`inclusive_end`](DateInterval::inclusive_end) or
    /// [`finish`](DateInterval::finish) as they see fit.
    ///
    /// # Errors
    /// Fails when the period end leaves the supported date range.
    pub fn resolve_end(&mut self) -> Result<()> {
        if let (Some(start), Some(duration)) = (self.start, self.duration) {
            self.end_of_duration = Some(duration.add(start)?);
        }
        if self.start.is_some() && self.next.is_none() {
            self.next = self.end_of_duration;
        }
        Ok(())
    }

    /// Locate the aligned period containing `date`, stepping the engine
    /// forward to it.
    ///
    /// Stabilizes on `date` first, so the first call also resolves the
    /// engine.  Returns `Ok(false)`, leaving the engine untouched, when
    /// `date` falls outside the window bounds or behind the current
    /// period.  An interval without a duration is the single period
    /// `[start, finish)`.
    ///
    /// # Errors
    /// Fails when the engine cannot be resolved at all (no deducible
    /// start and no duration).
    pub fn find_period(&mut self, date: NaiveDate) -> Result<bool> {
        self.stabilize(Some(date))?;

        if let Some(finish) = self.finish {
            if date >= finish {
                return Ok(false);
            }
        }
        let start = match self.start {
            Some(start) => start,
            None => fail!("interval has no start date and no duration to derive one"),
        };
        if date < start {
            return Ok(false);
        }

        let duration = match self.duration {
            Some(duration) => duration,
            // A window without a step size is one single period.
            None => return Ok(true),
        };
        ensure!(
            duration.length > 0,
            "cannot locate periods with a zero-length duration"
        );
        let end_of_duration = match self.end_of_duration {
            Some(end) => end,
            None => duration.add(start)?,
        };
        if date < end_of_duration {
            return Ok(true);
        }

        // Seek forward one period at a time so alignment stays exact even
        // when month steps clamp.
        let mut scan = end_of_duration;
        let mut end_of_scan = duration.add(scan)?;
        while date >= scan && self.finish.map_or(true, |finish| scan < finish) {
            if date < end_of_scan {
                self.start = Some(scan);
                self.end_of_duration = Some(end_of_scan);
                self.next = None;
                self.resolve_end()?;
                return Ok(true);
            }
            scan = end_of_scan;
            end_of_scan = duration.add(scan)?;
        }
        Ok(false)
    }

    /// Step to the next period.
    ///
    /// The new start is the old period's end, so consecutive periods tile
    /// the timeline without gap or overlap.
    ///
    /// # Errors
    /// `OutOfBounds`, with the engine left untouched, when the next period
    /// would begin at or past an explicit finish: the caller's signal that
    /// a bounded interval is exhausted.  `MalformedPeriod` when the engine
    /// was never stabilized or has no duration to step by.
    pub fn advance(&mut self) -> Result<()> {
        let start = match self.start {
            Some(start) => start,
            None => fail!("cannot advance an interval that has no start date"),
        };
        let duration = match self.duration {
            Some(duration) => duration,
            None => fail!("cannot advance an interval without a duration"),
        };
        ensure!(
            duration.length > 0,
            "cannot advance by a zero-length duration"
        );
        let next = match self.next {
            Some(next) => next,
            None => duration.add(start)?,
        };
        if let Some(finish) = self.finish {
            if next >= finish {
                return Err(Error::OutOfBounds(format!(
                    "the next period would begin at {next}, at or past the interval finish {finish}"
                )));
            }
        }
        self.start = Some(next);
        self.next = None;
        self.resolve_end()
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// The interval's lower edge: the resolved start when stabilized,
    /// otherwise the window's lower bound.
    ///
    /// # Errors
    /// Fails when the window cannot be resolved.
    pub fn begin(&self, disambiguation_year: Option<Year>) -> Result<Option<NaiveDate>> {
        match self.start {
            Some(start) => Ok(Some(start)),
            None => match &self.window {
                Some(window) => window.begin(disambiguation_year),
                None => Ok(None),
            },
        }
    }

    /// The interval's upper edge: the resolved finish when known,
    /// otherwise the window's upper bound.
    ///
    /// # Errors
    /// Fails when the window cannot be resolved.
    pub fn end(&self, disambiguation_year: Option<Year>) -> Result<Option<NaiveDate>> {
        match self.finish {
            Some(finish) => Ok(Some(finish)),
            None => match &self.window {
                Some(window) => window.end(disambiguation_year),
                None => Ok(None),
            },
        }
    }

    // ── Diagnostics ──────────────────────────────────────────────────────────

    /// Render the engine state before and after stabilization.
    ///
    /// Stabilization runs on a clone; the engine itself is untouched.
    pub fn dump(&self, reference: Option<NaiveDate>) -> String {
        let mut out = String::new();
        out.push_str("--- Before stabilization ---\n");
        self.render(&mut out);

        let mut copy = self.clone();
        match copy.stabilize(reference) {
            Ok(()) => {
                out.push_str("\n--- After stabilization ---\n");
                copy.render(&mut out);
            }
            Err(err) => {
                out.push_str("\n--- Stabilization failed ---\n");
                out.push_str(&format!("{err}\n"));
            }
        }
        out
    }

    fn render(&self, out: &mut String) {
        if let Some(window) = &self.window {
            out.push_str(&format!("  window: {window}\n"));
        }
        if let Some(start) = self.start {
            out.push_str(&format!("   start: {start}\n"));
        }
        if let Some(finish) = self.finish {
            out.push_str(&format!("  finish: {finish}\n"));
        }
        if let Some(duration) = self.duration {
            out.push_str(&format!("duration: {duration}\n"));
        }
        if let Some(end) = self.end_of_duration {
            out.push_str(&format!("     end: {end}\n"));
        }
    }

    /// Iterate the aligned periods of this interval as
    /// `(start, end_of_duration)` pairs.
    ///
    /// Works on a stabilized clone; the engine itself is untouched.  A
    /// bounded interval ends at its finish; an unbounded one yields
    /// forever, so cap it with `take` or similar.  An interval without a
    /// duration yields nothing.
    ///
    /// # Errors
    /// Fails when the engine cannot be stabilized.
    pub fn periods(&self, reference: Option<NaiveDate>) -> Result<Periods> {
        let mut interval = self.clone();
        interval.stabilize(reference)?;
        Ok(Periods {
            done: !interval.is_valid(),
            interval,
        })
    }
}

/// Iterator over the successive aligned periods of a [`DateInterval`].
///
/// Yields `(start, end_of_duration)` pairs; see
/// [`DateInterval::periods`].
#[derive(Debug, Clone)]
pub struct Periods {
    interval: DateInterval,
    done: bool,
}

impl Iterator for Periods {
    type Item = (NaiveDate, NaiveDate);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match (self.interval.start(), self.interval.end_of_duration()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                self.done = true;
                return None;
            }
        };
        if self.interval.advance().is_err() {
            self.done = true;
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::Quantum;
    use crate::range::DateRange;
    use crate::specifier::DateSpecifier;
    use chrono::Month;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_2021() -> DateSpecifier {
        DateSpecifier::new().with_year(2021).with_month(Month::March)
    }

    #[test]
    fn builder_starts_unresolved() {
        let interval = DateInterval::new()
            .with_window(march_2021())
            .with_duration(DateDuration::new(2, Quantum::Weeks));
        assert!(!interval.is_valid());
        assert!(!interval.is_aligned());
        assert_eq!(interval.start(), None);
        assert_eq!(interval.duration(), Some(DateDuration::new(2, Quantum::Weeks)));
    }

    #[test]
    fn begin_and_end_fall_back_to_the_window() {
        let interval = DateInterval::new().with_window(march_2021());
        assert_eq!(interval.begin(None).unwrap(), Some(date(2021, 3, 1)));
        assert_eq!(interval.end(None).unwrap(), Some(date(2021, 4, 1)));

        let bare = DateInterval::new();
        assert_eq!(bare.begin(None).unwrap(), None);
        assert_eq!(bare.end(None).unwrap(), None);
    }

    #[test]
    fn inclusive_end_is_one_before_the_period_end() {
        let mut interval = DateInterval::new().with_window(march_2021());
        interval.stabilize(None).unwrap();
        assert_eq!(interval.end_of_duration(), Some(date(2021, 4, 1)));
        assert_eq!(interval.inclusive_end(), Some(date(2021, 3, 31)));
    }

    #[test]
    fn same_start_ignores_everything_but_position() {
        let mut by_window = DateInterval::new().with_window(march_2021());
        by_window.stabilize(None).unwrap();

        let range = DateRange::new(Some(DateSpecifier::from_date(date(2021, 3, 10))), None);
        let mut by_range = DateInterval::new()
            .with_window(range)
            .with_duration(DateDuration::new(1, Quantum::Months));
        by_range.stabilize(None).unwrap();

        assert_eq!(by_window.start(), Some(date(2021, 3, 1)));
        assert_eq!(by_range.start(), Some(date(2021, 3, 1)));
        assert!(by_window.same_start(&by_range));
        assert_ne!(by_window, by_range, "structural equality still differs");

        assert!(DateInterval::new().same_start(&DateInterval::new()));
        assert!(!by_window.same_start(&DateInterval::new()));
    }

    #[test]
    fn dump_shows_both_phases() {
        let interval = DateInterval::new()
            .with_window(march_2021())
            .with_duration(DateDuration::new(1, Quantum::Months));
        let text = interval.dump(None);
        assert!(text.contains("--- Before stabilization ---"));
        assert!(text.contains("  window: in year 2021 month March"));
        assert!(text.contains("--- After stabilization ---"));
        assert!(text.contains("   start: 2021-03-01"));
        assert!(text.contains("  finish: 2021-04-01"));
        assert!(text.contains("duration: 1 month"));
    }

    #[test]
    fn dump_reports_unresolvable_windows() {
        // Month without a year: the reference date supplies 2021.
        let interval =
            DateInterval::new().with_window(DateSpecifier::new().with_month(Month::March));
        let text = interval.dump(Some(date(2021, 6, 15)));
        assert!(text.contains("   start: 2021-03-01"));

        // A contradictory range cannot stabilize.
        let backwards = DateRange::new(
            Some(DateSpecifier::new().with_year(2022)),
            Some(DateSpecifier::new().with_year(2020)),
        );
        let interval = DateInterval::new().with_window(backwards);
        let text = interval.dump(None);
        assert!(text.contains("--- Stabilization failed ---"));
    }
}

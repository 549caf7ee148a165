//! # kalends
//!
//! Recurring calendar periods and steppable date intervals for financial
//! reporting: partially specified dates ("March", "every Friday"),
//! calendar-aware durations ("2 weeks", "1 quarter"), and an interval
//! engine that buckets a chronological stream of records into aligned,
//! non-overlapping periods.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates.  Application code should depend on this
//! crate rather than the individual `kalends-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! kalends = "0.1"
//! ```
//!
//! ```rust
//! use kalends::periods::{DateInterval, DateSpecifier, Month, NaiveDate};
//!
//! // Report over March 2021, one period per calendar month.
//! let window = DateSpecifier::new().with_year(2021).with_month(Month::March);
//! let mut interval = DateInterval::new().with_window(window);
//! interval.stabilize(None)?;
//!
//! assert_eq!(interval.start(), NaiveDate::from_ymd_opt(2021, 3, 1));
//! assert_eq!(interval.inclusive_end(), NaiveDate::from_ymd_opt(2021, 3, 31));
//! # Ok::<(), kalends::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types: errors, the `Result` alias, and the `Clock` configuration.
pub use kalends_core as core;

/// Specifiers, durations, ranges, windows, and the interval engine.
pub use kalends_periods as periods;

//! # kalends-core
//!
//! Core types shared across the kalends workspace: the error type and
//! `Result` alias, the `ensure!` / `fail!` macros, the `Clock`
//! configuration object, and a few primitive aliases.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Clock configuration (today override, start of week).
pub mod clock;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// A calendar year in the proleptic Gregorian calendar.
pub type Year = i32;

/// A one-based day of the month (1–31).
pub type DayOfMonth = u32;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use clock::Clock;
pub use errors::{Error, Result};

//! Error types for kalends.
//!
//! Period resolution can go wrong in exactly two ways, and they call for
//! different handling.  A *malformed* period can never be resolved into
//! concrete dates and must surface to the caller; an *out of bounds* step
//! simply means a bounded interval has no more periods, which a report loop
//! treats as its termination signal.  The `ensure!` and `fail!` macros below
//! are shorthand for the malformed case.

use thiserror::Error;

/// The top-level error type used throughout kalends.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A window or duration cannot be resolved into concrete dates:
    /// a year is missing and no disambiguation year was supplied, the
    /// fields name an impossible calendar date, range bounds contradict
    /// each other, or date arithmetic left the representable range.
    #[error("malformed period: {0}")]
    MalformedPeriod(String),

    /// A step or search would leave the interval's explicit bounds.
    /// Recoverable: the engine state is untouched and the caller may
    /// treat this as "no more periods".
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}

impl Error {
    /// `true` for the recoverable "no more periods" case.
    ///
    /// # Example
    /// ```
    /// use kalends_core::errors::Error;
    ///
    /// let err = Error::OutOfBounds("past the interval finish".into());
    /// assert!(err.is_out_of_bounds());
    /// assert!(!Error::MalformedPeriod("no year".into()).is_out_of_bounds());
    /// ```
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::OutOfBounds(_))
    }
}

/// Shorthand `Result` type used throughout kalends.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::MalformedPeriod(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use kalends_core::ensure;
///
/// fn month_number(m: u32) -> kalends_core::errors::Result<u32> {
///     ensure!((1..=12).contains(&m), "month {m} is not in 1..=12");
///     Ok(m)
/// }
/// assert!(month_number(3).is_ok());
/// assert!(month_number(13).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::MalformedPeriod(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::MalformedPeriod(...))` immediately.
///
/// # Example
/// ```
/// use kalends_core::fail;
///
/// fn unresolvable() -> kalends_core::errors::Result<()> {
///     fail!("specifier has no year and no disambiguation year was given");
/// }
/// assert!(unresolvable().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::MalformedPeriod(format!($($msg)*)))
    };
}

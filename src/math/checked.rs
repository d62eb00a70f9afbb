//! Checked arithmetic that reports *which* bookkeeping step failed.
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning `checked_*` methods
//! of [`Amount`] and [`Shares`] into [`Result`]s carrying an
//! [`ExchangeError`], so reserve and share updates read as a chain of `?`.
//!
//! # Examples
//!
//! ```
//! use exchange_pair::domain::Amount;
//! use exchange_pair::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(100);
//! assert_eq!(reserve.safe_add(&Amount::new(5)).ok(), Some(Amount::new(105)));
//! assert!(reserve.safe_sub(&Amount::new(101)).is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::{ExchangeError, Result};

/// Fallible addition and subtraction with typed errors.
///
/// No saturation: an overflow is a bug in the caller's accounting and must
/// surface as an error.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the sum does not fit.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Underflow("share subtraction underflow"))
    }
}

//! 256-bit intermediates for multiply-then-divide.
//!
//! Reserves and amounts are `u128`, so the product of any two of them can
//! need 256 bits.  Every formula in the pricing engine and the liquidity
//! manager multiplies first, in [`U256`], and divides once at the end.  The
//! quotient is narrowed back to `u128` with an explicit check; a quotient
//! that does not fit is reported as [`ExchangeError::Overflow`], never
//! truncated.
//!
//! # Examples
//!
//! ```
//! use exchange_pair::domain::Rounding;
//! use exchange_pair::math::mul_div;
//!
//! // (2^127 * 4) / 8 overflows u128 in the intermediate but not in the result.
//! let big = 1u128 << 127;
//! assert_eq!(mul_div(big, 4, 8, Rounding::Down).ok(), Some(big / 2));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up).ok(), Some(4));
//! ```

use ethnum::U256;

use crate::domain::Rounding;
use crate::error::{ExchangeError, Result};

/// Widens a `u128` into a 256-bit intermediate.
#[inline]
#[must_use]
pub const fn widen(value: u128) -> U256 {
    U256::from_words(0, value)
}

/// Checked 256-bit product.
///
/// # Errors
///
/// Returns [`ExchangeError::Overflow`] if the product exceeds 256 bits,
/// which only happens when three or more full-width factors are chained.
#[inline]
pub fn mul_wide(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(ExchangeError::Overflow(context))
}

/// Divides a 256-bit numerator by a 256-bit denominator with explicit
/// rounding and narrows the quotient to `u128`.
///
/// # Errors
///
/// - [`ExchangeError::DivisionByZero`] if `denominator` is zero.
/// - [`ExchangeError::Overflow`] if the quotient needs more than 128 bits.
pub fn div_narrow(
    numerator: U256,
    denominator: U256,
    rounding: Rounding,
    context: &'static str,
) -> Result<u128> {
    if denominator == U256::ZERO {
        return Err(ExchangeError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    let quotient = match rounding {
        Rounding::Down => quotient,
        Rounding::Up => {
            if numerator % denominator == U256::ZERO {
                quotient
            } else {
                // quotient < 2^256 - 1 whenever a remainder exists
                quotient + U256::ONE
            }
        }
    };
    narrow(quotient, context)
}

/// Computes `a * b / denominator` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`ExchangeError::DivisionByZero`] if `denominator` is zero.
/// - [`ExchangeError::Overflow`] if the quotient needs more than 128 bits.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    // Two u128 factors always fit in 256 bits.
    let product = widen(a) * widen(b);
    div_narrow(product, widen(denominator), rounding, "mul_div quotient")
}

/// Narrows a 256-bit value to `u128`.
///
/// # Errors
///
/// Returns [`ExchangeError::Overflow`] if the high word is non-zero.
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    let (high, low) = value.into_words();
    if high != 0 {
        return Err(ExchangeError::Overflow(context));
    }
    Ok(low)
}

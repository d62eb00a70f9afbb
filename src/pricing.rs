//! Pricing engine: fee-adjusted constant-product formulas.
//!
//! Pure functions with no state.  The pool keeps 0.3% of every input,
//! expressed as the multiplier `997 / 1000`:
//!
//! ```text
//! forward:  out = floor(in * 997 * R_out / (R_in * 1000 + in * 997))
//! inverse:  in  = ceil (R_in * out * 1000 / ((R_out - out) * 997))
//! ```
//!
//! The inverse uses the same `1000` scale as the forward fee ratio; any
//! other scale would silently overcharge the payer.  Forward results round
//! down and inverse results round up, so `input_given_output` applied to
//! the result of `output_given_input` never asks for more than was paid
//! in, and rounding can never be farmed against the pool.
//!
//! All products are formed in 256 bits before the single division.
//!
//! # Examples
//!
//! ```
//! use exchange_pair::domain::Amount;
//! use exchange_pair::pricing::{input_given_output, output_given_input};
//!
//! let reserve = Amount::new(1_000_000);
//! let out = output_given_input(Amount::new(1_000), reserve, reserve).expect("priced");
//! assert_eq!(out, Amount::new(996));
//!
//! let back = input_given_output(out, reserve, reserve).expect("priced");
//! assert!(back <= Amount::new(1_000));
//! ```

use crate::domain::{Amount, Rounding};
use crate::error::{ExchangeError, Result};
use crate::math::{div_narrow, mul_div, mul_wide, widen};

/// Share of each input that is priced; the rest stays in the pool.
pub const FEE_NUMERATOR: u128 = 997;

/// Scale of [`FEE_NUMERATOR`].  Both pricing directions use this scale.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Output paid for an exact input.
///
/// Strictly increasing in `input_amount` (up to rounding) and always
/// strictly below `output_reserve`: no finite input drains the pool.
///
/// # Errors
///
/// - [`ExchangeError::ZeroAmount`] if `input_amount` is zero.
/// - [`ExchangeError::InvalidReserve`] if either reserve is zero.
/// - [`ExchangeError::Overflow`] if the 256-bit numerator overflows.
pub fn output_given_input(
    input_amount: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
) -> Result<Amount> {
    if input_amount.is_zero() {
        return Err(ExchangeError::ZeroAmount("input amount"));
    }
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(ExchangeError::InvalidReserve);
    }

    let input_with_fee = widen(input_amount.get()) * widen(FEE_NUMERATOR);
    let numerator = mul_wide(
        input_with_fee,
        widen(output_reserve.get()),
        "forward pricing numerator",
    )?;
    let denominator = widen(input_reserve.get()) * widen(FEE_DENOMINATOR) + input_with_fee;

    let out = div_narrow(
        numerator,
        denominator,
        Rounding::Down,
        "forward pricing result",
    )?;
    tracing::trace!(
        input = %input_amount,
        input_reserve = %input_reserve,
        output_reserve = %output_reserve,
        output = %out,
        "priced exact input"
    );
    Ok(Amount::new(out))
}

/// Input required for an exact output.
///
/// Grows without bound as `output_amount` approaches `output_reserve`,
/// which is why every exact-output swap carries a caller maximum.
///
/// # Errors
///
/// - [`ExchangeError::ZeroAmount`] if `output_amount` is zero.
/// - [`ExchangeError::InvalidReserve`] if either reserve is zero.
/// - [`ExchangeError::InsufficientLiquidity`] if
///   `output_amount >= output_reserve`.
/// - [`ExchangeError::Overflow`] if the required input exceeds 128 bits.
pub fn input_given_output(
    output_amount: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
) -> Result<Amount> {
    if output_amount.is_zero() {
        return Err(ExchangeError::ZeroAmount("output amount"));
    }
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(ExchangeError::InvalidReserve);
    }
    if output_amount >= output_reserve {
        return Err(ExchangeError::InsufficientLiquidity);
    }

    let numerator = mul_wide(
        widen(input_reserve.get()) * widen(output_amount.get()),
        widen(FEE_DENOMINATOR),
        "inverse pricing numerator",
    )?;
    // output_amount < output_reserve was checked above
    let remaining = output_reserve.get() - output_amount.get();
    let denominator = widen(remaining) * widen(FEE_NUMERATOR);

    let input = div_narrow(numerator, denominator, Rounding::Up, "inverse pricing result")?;
    tracing::trace!(
        output = %output_amount,
        input_reserve = %input_reserve,
        output_reserve = %output_reserve,
        input = %input,
        "priced exact output"
    );
    Ok(Amount::new(input))
}

/// Scales `amount` by the reserve ratio `numerator / denominator`.
///
/// This is the ratio math the liquidity manager uses for required deposits,
/// minted shares, and withdrawal payouts.  The caller picks the rounding
/// direction that favours the pool.
///
/// # Errors
///
/// - [`ExchangeError::InvalidReserve`] if `denominator` is zero.
/// - [`ExchangeError::Overflow`] if the result exceeds 128 bits.
pub fn proportional(
    amount: u128,
    numerator: u128,
    denominator: u128,
    rounding: Rounding,
) -> Result<u128> {
    if denominator == 0 {
        return Err(ExchangeError::InvalidReserve);
    }
    mul_div(amount, numerator, denominator, rounding)
}

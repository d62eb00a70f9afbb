//! Guard layer: checks shared by every mutating operation.
//!
//! Guards are plain functions returning `Result<()>`.  Pool operations run
//! all of them before touching state or the ledger, so a failing guard
//! always leaves the pool untouched.
//!
//! | Guard | Error |
//! |-------|-------|
//! | [`check_deadline`] | [`ExchangeError::TransactionExpired`] |
//! | [`require_positive`] / [`require_positive_shares`] | [`ExchangeError::ZeroAmount`] |
//! | [`ensure_min_output`] / [`ensure_max_input`] | [`ExchangeError::SlippageExceeded`] |
//! | [`ensure_product_non_decreasing`] | [`ExchangeError::InvariantViolation`] |

use ethnum::U256;

use crate::domain::{Amount, Shares, Timestamp};
use crate::error::{ExchangeError, Result};
use crate::math::widen;

/// Rejects an operation executing after its deadline.
///
/// The deadline is inclusive: executing at exactly `deadline` is allowed.
///
/// # Errors
///
/// Returns [`ExchangeError::TransactionExpired`] if `now > deadline`.
pub fn check_deadline(deadline: Timestamp, now: Timestamp) -> Result<()> {
    if deadline.has_passed(now) {
        tracing::debug!(%deadline, %now, "rejecting expired operation");
        return Err(ExchangeError::TransactionExpired { deadline, now });
    }
    Ok(())
}

/// Rejects a zero amount.
///
/// # Errors
///
/// Returns [`ExchangeError::ZeroAmount`] naming `what`.
pub fn require_positive(amount: Amount, what: &'static str) -> Result<()> {
    if amount.is_zero() {
        return Err(ExchangeError::ZeroAmount(what));
    }
    Ok(())
}

/// Rejects a zero share count.
///
/// # Errors
///
/// Returns [`ExchangeError::ZeroAmount`] naming `what`.
pub fn require_positive_shares(shares: Shares, what: &'static str) -> Result<()> {
    if shares.is_zero() {
        return Err(ExchangeError::ZeroAmount(what));
    }
    Ok(())
}

/// Rejects an output below the caller's minimum.
///
/// # Errors
///
/// Returns [`ExchangeError::SlippageExceeded`] if `actual < minimum`.
pub fn ensure_min_output(actual: Amount, minimum: Amount) -> Result<()> {
    if actual < minimum {
        tracing::debug!(%actual, %minimum, "output below caller minimum");
        return Err(ExchangeError::SlippageExceeded("output below caller minimum"));
    }
    Ok(())
}

/// Rejects an input above the caller's maximum.
///
/// # Errors
///
/// Returns [`ExchangeError::SlippageExceeded`] if `actual > maximum`.
pub fn ensure_max_input(actual: Amount, maximum: Amount) -> Result<()> {
    if actual > maximum {
        tracing::debug!(%actual, %maximum, "input above caller maximum");
        return Err(ExchangeError::SlippageExceeded("input above caller maximum"));
    }
    Ok(())
}

/// The reserve product `a * b`, exact in 256 bits.
#[must_use]
pub fn reserve_product(reserve_a: Amount, reserve_b: Amount) -> U256 {
    widen(reserve_a.get()) * widen(reserve_b.get())
}

/// Rejects a swap whose post-trade reserves would shrink the product.
///
/// With the 997/1000 fee and pool-favouring rounding this can only fail if
/// the pricing or bookkeeping is wrong, so it runs on every swap as the
/// last check before any transfer.
///
/// # Errors
///
/// Returns [`ExchangeError::InvariantViolation`] if
/// `after_a * after_b < before_a * before_b`.
pub fn ensure_product_non_decreasing(
    before: (Amount, Amount),
    after: (Amount, Amount),
) -> Result<()> {
    let k_before = reserve_product(before.0, before.1);
    let k_after = reserve_product(after.0, after.1);
    if k_after < k_before {
        tracing::error!(%k_before, %k_after, "swap would shrink the reserve product");
        return Err(ExchangeError::InvariantViolation(
            "reserve product decreased",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn deadline_in_future_passes() {
        assert!(check_deadline(Timestamp::new(10), Timestamp::new(9)).is_ok());
        assert!(check_deadline(Timestamp::new(10), Timestamp::new(10)).is_ok());
    }

    #[test]
    fn deadline_in_past_fails() {
        let Err(ExchangeError::TransactionExpired { deadline, now }) =
            check_deadline(Timestamp::new(10), Timestamp::new(11))
        else {
            panic!("expected TransactionExpired");
        };
        assert_eq!(deadline, Timestamp::new(10));
        assert_eq!(now, Timestamp::new(11));
    }

    #[test]
    fn zero_amounts() {
        assert!(matches!(
            require_positive(Amount::ZERO, "x"),
            Err(ExchangeError::ZeroAmount("x"))
        ));
        assert!(require_positive(Amount::new(1), "x").is_ok());
        assert!(matches!(
            require_positive_shares(Shares::ZERO, "s"),
            Err(ExchangeError::ZeroAmount("s"))
        ));
    }

    #[test]
    fn slippage_bounds_are_inclusive() {
        assert!(ensure_min_output(Amount::new(5), Amount::new(5)).is_ok());
        assert!(matches!(
            ensure_min_output(Amount::new(4), Amount::new(5)),
            Err(ExchangeError::SlippageExceeded(_))
        ));
        assert!(ensure_max_input(Amount::new(5), Amount::new(5)).is_ok());
        assert!(matches!(
            ensure_max_input(Amount::new(6), Amount::new(5)),
            Err(ExchangeError::SlippageExceeded(_))
        ));
    }

    #[test]
    fn product_guard() {
        let before = (Amount::new(100), Amount::new(100));
        assert!(ensure_product_non_decreasing(before, (Amount::new(110), Amount::new(91))).is_ok());
        assert!(matches!(
            ensure_product_non_decreasing(before, (Amount::new(110), Amount::new(90))),
            Err(ExchangeError::InvariantViolation(_))
        ));
    }

    #[test]
    fn product_is_exact_beyond_u128() {
        let big = Amount::new(u128::MAX);
        let k = reserve_product(big, big);
        assert!(k > widen(u128::MAX));
    }
}

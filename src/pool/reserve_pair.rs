//! Cached reserve balances of a pool.

use core::fmt;

use ethnum::U256;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Side};
use crate::guard::reserve_product;
use crate::math::CheckedArithmetic;

/// The pool's holdings of the base asset (A) and the paired asset (B).
///
/// Between operations this always equals what the ledger reports for the
/// pool account.  Updates return a new value; the pool swaps it in only
/// once every check has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ReservePair {
    reserve_a: Amount,
    reserve_b: Amount,
}

impl ReservePair {
    /// No reserves.
    pub const EMPTY: Self = Self::new(Amount::ZERO, Amount::ZERO);

    /// Creates a reserve pair.
    #[must_use]
    pub const fn new(reserve_a: Amount, reserve_b: Amount) -> Self {
        Self {
            reserve_a,
            reserve_b,
        }
    }

    /// Base asset reserve.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Paired asset reserve.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Reserve on the given side.
    pub const fn get(&self, side: Side) -> Amount {
        match side {
            Side::Base => self.reserve_a,
            Side::Paired => self.reserve_b,
        }
    }

    /// `(input reserve, output reserve)` for a trade paying in on `side_in`.
    #[must_use]
    pub const fn oriented(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::Base => (self.reserve_a, self.reserve_b),
            Side::Paired => (self.reserve_b, self.reserve_a),
        }
    }

    /// Returns `true` if both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }

    /// Returns `true` if either reserve is zero.
    #[must_use]
    pub const fn has_zero_side(&self) -> bool {
        self.reserve_a.is_zero() || self.reserve_b.is_zero()
    }

    /// Exact product `reserve_a * reserve_b`.
    #[must_use]
    pub fn product(&self) -> U256 {
        reserve_product(self.reserve_a, self.reserve_b)
    }

    /// Reserves after the pool receives `amount_in` on `side_in` and pays
    /// `amount_out` on the other side.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Overflow`](crate::error::ExchangeError::Overflow) or
    /// [`ExchangeError::Underflow`](crate::error::ExchangeError::Underflow).
    pub fn after_swap(
        &self,
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
    ) -> crate::error::Result<Self> {
        let (reserve_in, reserve_out) = self.oriented(side_in);
        let reserve_in = reserve_in.safe_add(&amount_in)?;
        let reserve_out = reserve_out.safe_sub(&amount_out)?;
        Ok(match side_in {
            Side::Base => Self::new(reserve_in, reserve_out),
            Side::Paired => Self::new(reserve_out, reserve_in),
        })
    }

    /// Reserves after both sides grow.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Overflow`](crate::error::ExchangeError::Overflow).
    pub fn credited(&self, amount_a: Amount, amount_b: Amount) -> crate::error::Result<Self> {
        Ok(Self::new(
            self.reserve_a.safe_add(&amount_a)?,
            self.reserve_b.safe_add(&amount_b)?,
        ))
    }

    /// Reserves after both sides shrink.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Underflow`](crate::error::ExchangeError::Underflow).
    pub fn debited(&self, amount_a: Amount, amount_b: Amount) -> crate::error::Result<Self> {
        Ok(Self::new(
            self.reserve_a.safe_sub(&amount_a)?,
            self.reserve_b.safe_sub(&amount_b)?,
        ))
    }
}

impl fmt::Display for ReservePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.reserve_a, self.reserve_b)
    }
}

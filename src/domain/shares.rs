//! Liquidity-share quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// A quantity of liquidity shares.
///
/// Distinct from [`Amount`] because it counts claims on the reserve pair,
/// not units of either asset.  A holder's shares divided by the total
/// supply is their proportional claim on both reserves.
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::Shares;
///
/// let a = Shares::new(1_000);
/// assert_eq!(a.checked_add(&Shares::new(1)), Some(Shares::new(1_001)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw share count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw share count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets an asset amount as a share count.
    ///
    /// Used when the first deposit mints shares one-for-one with the
    /// paired-asset amount.
    pub const fn from_amount(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

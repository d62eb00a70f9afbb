//! Raw asset amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw asset amount in the smallest unit of the asset.
///
/// `Amount` never interprets decimals.  Every `u128` is a valid amount;
/// arithmetic is checked and returns `None` instead of wrapping.  Products
/// of two amounts can exceed 128 bits, so multiply-then-divide goes through
/// [`mul_div`](crate::math::mul_div) rather than through this type.
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::Amount;
///
/// let a = Amount::new(100);
/// assert_eq!(a.checked_add(&Amount::new(5)), Some(Amount::new(105)));
/// assert_eq!(a.checked_sub(&Amount::new(101)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for zero.
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
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn add_and_overflow() {
        assert_eq!(
            Amount::new(1).checked_add(&Amount::new(2)),
            Some(Amount::new(3))
        );
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_and_underflow() {
        assert_eq!(
            Amount::new(5).checked_sub(&Amount::new(5)),
            Some(Amount::ZERO)
        );
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
    }

    #[test]
    fn ordering() {
        assert!(Amount::new(1) < Amount::new(2));
    }

    #[test]
    fn display() {
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }

    #[test]
    fn serializes_as_bare_number() {
        let Ok(json) = serde_json::to_string(&Amount::new(42)) else {
            panic!("serializable");
        };
        assert_eq!(json, "42");
    }
}

//! Explicit rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Rounding direction for a division.
///
/// Every division in the crate names its direction.  The rule is that
/// truncation always lands on the pool's side:
///
/// | Quantity | Direction |
/// |----------|-----------|
/// | swap output, withdrawal amounts, minted shares | [`Rounding::Down`] |
/// | swap input, base asset required by a deposit | [`Rounding::Up`] |
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Towards positive infinity (ceiling).
    Up,
    /// Towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` for [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

//! Results returned by the mutating operations.
//!
//! Receipts are built once, from the amounts that were actually priced and
//! settled, and returned by value.  There is no default or partially filled
//! receipt.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Shares};

/// Outcome of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapReceipt {
    asset_in: Address,
    amount_in: Amount,
    asset_out: Address,
    amount_out: Amount,
}

impl SwapReceipt {
    pub(crate) const fn new(
        asset_in: Address,
        amount_in: Amount,
        asset_out: Address,
        amount_out: Amount,
    ) -> Self {
        Self {
            asset_in,
            amount_in,
            asset_out,
            amount_out,
        }
    }

    /// Asset paid into the pool.
    #[must_use]
    pub const fn asset_in(&self) -> Address {
        self.asset_in
    }

    /// Amount pulled from the caller.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Asset paid out.
    #[must_use]
    pub const fn asset_out(&self) -> Address {
        self.asset_out
    }

    /// Amount pushed to the caller.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Swap(in={}, out={})", self.amount_in, self.amount_out)
    }
}

/// Outcome of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositReceipt {
    amount_a: Amount,
    amount_b: Amount,
    shares_minted: Shares,
}

impl DepositReceipt {
    pub(crate) const fn new(amount_a: Amount, amount_b: Amount, shares_minted: Shares) -> Self {
        Self {
            amount_a,
            amount_b,
            shares_minted,
        }
    }

    /// Base asset pulled from the depositor.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Paired asset pulled from the depositor.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Shares credited to the depositor.
    pub const fn shares_minted(&self) -> Shares {
        self.shares_minted
    }
}

/// Outcome of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    amount_a: Amount,
    amount_b: Amount,
    shares_burned: Shares,
}

impl WithdrawReceipt {
    pub(crate) const fn new(amount_a: Amount, amount_b: Amount, shares_burned: Shares) -> Self {
        Self {
            amount_a,
            amount_b,
            shares_burned,
        }
    }

    /// Base asset pushed to the holder.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Paired asset pushed to the holder.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Shares removed from the holder and the total supply.
    pub const fn shares_burned(&self) -> Shares {
        self.shares_burned
    }

    /// The withdrawn amounts as an `(amount_a, amount_b)` tuple.
    pub const fn amounts(&self) -> (Amount, Amount) {
        (self.amount_a, self.amount_b)
    }
}

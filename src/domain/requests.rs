//! Caller-supplied parameters for the four mutating operations.
//!
//! Every request carries its own slippage bound and deadline.  Neither is
//! optional: a swap without a bound on the other side of the trade can be
//! priced arbitrarily badly by the time it executes, so the types make the
//! bound a required field rather than an `Option`.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Shares, Timestamp};

/// Sell exactly `amount_in` of `asset_in`; receive at least `min_amount_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapExactInput {
    /// Asset paid into the pool.
    pub asset_in: Address,
    /// Exact amount paid.
    pub amount_in: Amount,
    /// Asset received from the pool.
    pub asset_out: Address,
    /// Smallest acceptable output.
    pub min_amount_out: Amount,
    /// Latest execution time.
    pub deadline: Timestamp,
}

impl SwapExactInput {
    /// Bundles the parameters of an exact-input swap.
    pub const fn new(
        asset_in: Address,
        amount_in: Amount,
        asset_out: Address,
        min_amount_out: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            asset_in,
            amount_in,
            asset_out,
            min_amount_out,
            deadline,
        }
    }
}

/// Receive exactly `amount_out` of `asset_out`; pay at most `max_amount_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapExactOutput {
    /// Asset paid into the pool.
    pub asset_in: Address,
    /// Asset received from the pool.
    pub asset_out: Address,
    /// Exact amount received.
    pub amount_out: Amount,
    /// Largest acceptable payment.
    pub max_amount_in: Amount,
    /// Latest execution time.
    pub deadline: Timestamp,
}

impl SwapExactOutput {
    /// Bundles the parameters of an exact-output swap.
    pub const fn new(
        asset_in: Address,
        asset_out: Address,
        amount_out: Amount,
        max_amount_in: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            asset_in,
            asset_out,
            amount_out,
            max_amount_in,
            deadline,
        }
    }
}

/// Add liquidity quoted in the paired asset.
///
/// On an empty pool `max_amount_a` is deposited as-is and, together with
/// `desired_amount_b`, fixes the opening ratio.  On an active pool the base
/// amount is derived from the current ratio and `max_amount_a` only bounds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deposit {
    /// Paired-asset (B) amount to deposit.
    pub desired_amount_b: Amount,
    /// Fewest shares the caller accepts.
    pub min_shares_out: Shares,
    /// Most base asset (A) the caller will pay.
    pub max_amount_a: Amount,
    /// Latest execution time.
    pub deadline: Timestamp,
}

impl Deposit {
    /// Bundles the parameters of a deposit.
    pub const fn new(
        desired_amount_b: Amount,
        min_shares_out: Shares,
        max_amount_a: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            desired_amount_b,
            min_shares_out,
            max_amount_a,
            deadline,
        }
    }
}

/// Burn shares for a proportional slice of both reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Withdraw {
    /// Shares to burn.
    pub shares: Shares,
    /// Smallest acceptable base-asset (A) payout.
    pub min_amount_a: Amount,
    /// Smallest acceptable paired-asset (B) payout.
    pub min_amount_b: Amount,
    /// Latest execution time.
    pub deadline: Timestamp,
}

impl Withdraw {
    /// Bundles the parameters of a withdrawal.
    pub const fn new(
        shares: Shares,
        min_amount_a: Amount,
        min_amount_b: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            shares,
            min_amount_a,
            min_amount_b,
            deadline,
        }
    }
}

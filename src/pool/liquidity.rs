//! Liquidity manager: proportional deposits and withdrawals.
//!
//! Deposits are quoted in the paired asset (B).  The first deposit into an
//! empty pool fixes the exchange ratio from whatever the depositor brings
//! and mints one share per unit of B.  Later deposits pay
//! `ceil(dB * reserveA / reserveB)` of the base asset and receive
//! `floor(dB * totalShares / reserveB)` shares, so the reserve ratio moves
//! by less than one unit of rounding and never against existing holders.
//!
//! Withdrawals pay `floor(shares * reserve / totalShares)` of each asset.
//! Burning every outstanding share empties the pool.

use crate::domain::{Address, Deposit, DepositReceipt, Shares, Withdraw, WithdrawReceipt};
use crate::error::{ExchangeError, Result};
use crate::events::{LiquidityAdded, LiquidityRemoved};
use crate::guard;
use crate::traits::{AssetLedger, Clock, EventSink};

use super::exchange_pool::{proportional_deposit, proportional_withdrawal};
use super::{ExchangePool, PoolState};

impl<L, C, E> ExchangePool<L, C, E>
where
    L: AssetLedger,
    C: Clock,
    E: EventSink,
{
    /// Deposits `request.desired_amount_b` of the paired asset plus the
    /// matching base amount, and credits shares to `caller`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::TransactionExpired`] past the deadline.
    /// - [`ExchangeError::ZeroAmount`] for a zero paired amount, or a zero
    ///   base amount on an empty pool.
    /// - [`ExchangeError::InvalidReserve`] if an active pool has a zero
    ///   reserve.
    /// - [`ExchangeError::InsufficientLiquidityMinted`] if fewer than
    ///   `min_shares_out` (or zero) shares would be minted.
    /// - [`ExchangeError::ExcessiveInputRequired`] if the base amount the
    ///   ratio requires exceeds `max_amount_a`.
    /// - [`ExchangeError::Ledger`] if settlement fails.
    pub fn deposit(&mut self, caller: Address, request: Deposit) -> Result<DepositReceipt> {
        guard::check_deadline(request.deadline, self.now())?;
        guard::require_positive(request.desired_amount_b, "desired paired amount")?;

        let reserves = self.current_reserves();
        let opening = self.state() == PoolState::Empty;
        let (amount_a, minted) = if opening {
            guard::require_positive(request.max_amount_a, "base amount")?;
            (
                request.max_amount_a,
                Shares::from_amount(request.desired_amount_b),
            )
        } else {
            proportional_deposit(request.desired_amount_b, reserves, self.shares.total())?
        };
        let amount_b = request.desired_amount_b;

        if minted.is_zero() || minted < request.min_shares_out {
            return Err(ExchangeError::InsufficientLiquidityMinted {
                minted: minted.get(),
                minimum: request.min_shares_out.get(),
            });
        }
        if amount_a > request.max_amount_a {
            return Err(ExchangeError::ExcessiveInputRequired {
                required: amount_a.get(),
                maximum: request.max_amount_a.get(),
            });
        }
        let next = reserves.credited(amount_a, amount_b)?;

        let pair = *self.pair();
        let batch = self
            .batch()
            .pull(pair.base(), caller, amount_a)
            .pull(pair.paired(), caller, amount_b);

        let snapshot = self.snapshot(true);
        self.shares.mint(caller, minted)?;
        self.reserves = next;
        self.settle_or_restore(&batch, snapshot)?;

        tracing::debug!(
            provider = %caller,
            %amount_a,
            %amount_b,
            shares = %minted,
            total_shares = %self.shares.total(),
            reserves = %self.reserves,
            opening,
            "liquidity added"
        );
        self.emit(LiquidityAdded {
            provider: caller,
            base_amount: amount_a,
            paired_amount: amount_b,
            shares_minted: minted,
        });
        Ok(DepositReceipt::new(amount_a, amount_b, minted))
    }

    /// Burns `request.shares` held by `caller` and pays out the
    /// proportional slice of both reserves.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::TransactionExpired`] past the deadline.
    /// - [`ExchangeError::ZeroAmount`] for zero shares.
    /// - [`ExchangeError::InsufficientShares`] if `caller` holds fewer.
    /// - [`ExchangeError::SlippageExceeded`] if either payout is below its
    ///   minimum.
    /// - [`ExchangeError::InsufficientLiquidity`] if both payouts round
    ///   to zero.
    /// - [`ExchangeError::Ledger`] if settlement fails.
    pub fn withdraw(&mut self, caller: Address, request: Withdraw) -> Result<WithdrawReceipt> {
        guard::check_deadline(request.deadline, self.now())?;
        guard::require_positive_shares(request.shares, "shares to burn")?;
        let held = self.shares.balance_of(&caller);
        if held < request.shares {
            return Err(ExchangeError::InsufficientShares {
                available: held.get(),
                requested: request.shares.get(),
            });
        }

        let reserves = self.current_reserves();
        let (amount_a, amount_b) =
            proportional_withdrawal(request.shares, reserves, self.shares.total())?;
        guard::ensure_min_output(amount_a, request.min_amount_a)?;
        guard::ensure_min_output(amount_b, request.min_amount_b)?;
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }
        let next = reserves.debited(amount_a, amount_b)?;

        let pair = *self.pair();
        let batch = self
            .batch()
            .push(pair.base(), caller, amount_a)
            .push(pair.paired(), caller, amount_b);

        let snapshot = self.snapshot(true);
        self.shares.burn(&caller, request.shares)?;
        self.reserves = next;
        self.settle_or_restore(&batch, snapshot)?;

        tracing::debug!(
            provider = %caller,
            %amount_a,
            %amount_b,
            shares = %request.shares,
            total_shares = %self.shares.total(),
            reserves = %self.reserves,
            "liquidity removed"
        );
        if self.state() == PoolState::Empty {
            tracing::debug!("last shares burned; pool is empty");
        }
        self.emit(LiquidityRemoved {
            provider: caller,
            base_amount: amount_a,
            paired_amount: amount_b,
            shares_burned: request.shares,
        });
        Ok(WithdrawReceipt::new(amount_a, amount_b, request.shares))
    }
}

//! Swap executor: validated exact-input and exact-output trades.
//!
//! A swap pays exactly the priced amount and nothing else.  After pricing
//! and the caller's bound, the new reserves are checked against the
//! reserve product before any asset moves.

use crate::domain::{Address, Amount, Side, SwapExactInput, SwapExactOutput, SwapReceipt, Timestamp};
use crate::error::{ExchangeError, Result};
use crate::events::SwapEvent;
use crate::guard;
use crate::pricing;
use crate::traits::{AssetLedger, Clock, EventSink};

use super::{ExchangePool, ReservePair};

/// A fully priced swap, ready to apply.
struct PricedSwap {
    /// Reserves the swap was priced against.
    reserves: ReservePair,
    side_in: Side,
    amount_in: Amount,
    amount_out: Amount,
}

impl<L, C, E> ExchangePool<L, C, E>
where
    L: AssetLedger,
    C: Clock,
    E: EventSink,
{
    /// Sells exactly `request.amount_in` for at least
    /// `request.min_amount_out`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::TransactionExpired`] past the deadline.
    /// - [`ExchangeError::ZeroAmount`] for a zero input or a zero priced
    ///   output.
    /// - [`ExchangeError::UnknownAsset`] / [`ExchangeError::InvalidAddress`]
    ///   for assets outside the pair or a same-asset trade.
    /// - [`ExchangeError::InvalidReserve`] if a reserve is zero.
    /// - [`ExchangeError::SlippageExceeded`] if the output is below the
    ///   minimum.
    /// - [`ExchangeError::Ledger`] if settlement fails.
    pub fn swap_exact_input(
        &mut self,
        caller: Address,
        request: SwapExactInput,
    ) -> Result<SwapReceipt> {
        guard::check_deadline(request.deadline, self.now())?;
        guard::require_positive(request.amount_in, "input amount")?;
        let side_in = self.pair().direction(&request.asset_in, &request.asset_out)?;

        let reserves = self.current_reserves();
        let (reserve_in, reserve_out) = reserves.oriented(side_in);
        let amount_out = pricing::output_given_input(request.amount_in, reserve_in, reserve_out)?;
        if amount_out.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap output"));
        }
        guard::ensure_min_output(amount_out, request.min_amount_out)?;

        self.execute_swap(
            caller,
            PricedSwap {
                reserves,
                side_in,
                amount_in: request.amount_in,
                amount_out,
            },
        )
    }

    /// Buys exactly `request.amount_out` for at most `request.max_amount_in`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::TransactionExpired`] past the deadline.
    /// - [`ExchangeError::ZeroAmount`] for a zero output.
    /// - [`ExchangeError::UnknownAsset`] / [`ExchangeError::InvalidAddress`]
    ///   for assets outside the pair or a same-asset trade.
    /// - [`ExchangeError::InvalidReserve`] if a reserve is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if the output is not
    ///   strictly below the output reserve.
    /// - [`ExchangeError::SlippageExceeded`] if the input is above the
    ///   maximum.
    /// - [`ExchangeError::Ledger`] if settlement fails.
    pub fn swap_exact_output(
        &mut self,
        caller: Address,
        request: SwapExactOutput,
    ) -> Result<SwapReceipt> {
        guard::check_deadline(request.deadline, self.now())?;
        guard::require_positive(request.amount_out, "output amount")?;
        let side_in = self.pair().direction(&request.asset_in, &request.asset_out)?;

        let reserves = self.current_reserves();
        let (reserve_in, reserve_out) = reserves.oriented(side_in);
        let amount_in = pricing::input_given_output(request.amount_out, reserve_in, reserve_out)?;
        guard::ensure_max_input(amount_in, request.max_amount_in)?;

        self.execute_swap(
            caller,
            PricedSwap {
                reserves,
                side_in,
                amount_in,
                amount_out: request.amount_out,
            },
        )
    }

    /// Sells exactly `amount_in` of the paired asset for the base asset.
    ///
    /// # Errors
    ///
    /// Same as [`swap_exact_input`](Self::swap_exact_input).
    pub fn sell_paired_exact(
        &mut self,
        caller: Address,
        amount_in: Amount,
        min_base_out: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt> {
        let pair = *self.pair();
        self.swap_exact_input(
            caller,
            SwapExactInput::new(pair.paired(), amount_in, pair.base(), min_base_out, deadline),
        )
    }

    /// Sells exactly `amount_in` of the base asset for the paired asset.
    ///
    /// # Errors
    ///
    /// Same as [`swap_exact_input`](Self::swap_exact_input).
    pub fn sell_base_exact(
        &mut self,
        caller: Address,
        amount_in: Amount,
        min_paired_out: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt> {
        let pair = *self.pair();
        self.swap_exact_input(
            caller,
            SwapExactInput::new(pair.base(), amount_in, pair.paired(), min_paired_out, deadline),
        )
    }

    /// Buys exactly `paired_out` of the paired asset, paying base asset.
    ///
    /// # Errors
    ///
    /// Same as [`swap_exact_output`](Self::swap_exact_output).
    pub fn buy_paired_exact(
        &mut self,
        caller: Address,
        paired_out: Amount,
        max_base_in: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt> {
        let pair = *self.pair();
        self.swap_exact_output(
            caller,
            SwapExactOutput::new(pair.base(), pair.paired(), paired_out, max_base_in, deadline),
        )
    }

    /// Buys exactly `base_out` of the base asset, paying paired asset.
    ///
    /// # Errors
    ///
    /// Same as [`swap_exact_output`](Self::swap_exact_output).
    pub fn buy_base_exact(
        &mut self,
        caller: Address,
        base_out: Amount,
        max_paired_in: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt> {
        let pair = *self.pair();
        self.swap_exact_output(
            caller,
            SwapExactOutput::new(pair.paired(), pair.base(), base_out, max_paired_in, deadline),
        )
    }

    /// Checks the product, applies the reserves, settles, and reports.
    fn execute_swap(&mut self, caller: Address, swap: PricedSwap) -> Result<SwapReceipt> {
        let PricedSwap {
            reserves: before,
            side_in,
            amount_in,
            amount_out,
        } = swap;
        let after = before.after_swap(side_in, amount_in, amount_out)?;
        guard::ensure_product_non_decreasing(
            (before.reserve_a(), before.reserve_b()),
            (after.reserve_a(), after.reserve_b()),
        )?;

        let pair = *self.pair();
        let asset_in = pair.asset(side_in);
        let asset_out = pair.asset(side_in.opposite());
        let batch = self
            .batch()
            .pull(asset_in, caller, amount_in)
            .push(asset_out, caller, amount_out);

        let snapshot = self.snapshot(false);
        self.reserves = after;
        self.settle_or_restore(&batch, snapshot)?;

        tracing::debug!(
            swapper = %caller,
            %asset_in,
            %amount_in,
            %asset_out,
            %amount_out,
            reserves = %self.reserves,
            "swap executed"
        );
        self.emit(SwapEvent {
            swapper: caller,
            input_asset: asset_in,
            input_amount: amount_in,
            output_asset: asset_out,
            output_amount: amount_out,
        });
        Ok(SwapReceipt::new(asset_in, amount_in, asset_out, amount_out))
    }
}

//! The exchange pool: state, reserve observation, quotes, and settlement.
//!
//! Mutating operations live in `swap.rs` (swap executor) and `liquidity.rs`
//! (liquidity manager).  They all follow the same order:
//!
//! 1. Guards: deadline, zero amounts, asset membership.
//! 2. Read the ledger balances of the pool account as the reserves.  The
//!    cache is not written yet.
//! 3. Price the operation and check the caller's bounds.
//! 4. Snapshot bookkeeping, apply the new reserves and shares.
//! 5. Settle one [`TransferBatch`] with the ledger; on failure restore the
//!    snapshot, re-read the reserves from the ledger, and return the
//!    ledger error.
//! 6. Emit the event and return the receipt.
//!
//! No transfer happens before step 5.  A failure in steps 1 to 4 leaves
//! the pool and the ledger exactly as they were.  After step 5 the cached
//! reserves equal the ledger balances whatever the outcome.

use core::fmt;

use crate::config::PoolConfig;
use crate::domain::{Address, Amount, AssetPair, Rounding, Shares, Timestamp};
use crate::error::{ExchangeError, Result};
use crate::events::{PoolEvent, SharesTransferred};
use crate::guard;
use crate::ledger::LedgerError;
use crate::pricing;
use crate::traits::{AssetLedger, Clock, EventLog, EventSink, SystemClock, TransferBatch};

use super::{ReservePair, ShareRegistry};

/// Lifecycle state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolState {
    /// No shares outstanding.  The next deposit sets the exchange ratio.
    Empty,
    /// Shares outstanding; deposits must follow the current ratio.
    Active,
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Active => f.write_str("Active"),
        }
    }
}

/// Bookkeeping captured before effects are applied.
#[derive(Debug, Clone)]
pub(super) struct Snapshot {
    reserves: ReservePair,
    shares: Option<ShareRegistry>,
}

/// A two-asset constant-product exchange pool.
///
/// The pool owns its collaborators: the [`AssetLedger`] holding the
/// reserves, the [`Clock`] deadlines are checked against, and the
/// [`EventSink`] receiving events.  Every mutating operation takes
/// `&mut self`, so operations on one pool are serial and none can re-enter
/// another.
///
/// # Example
///
/// ```rust
/// use exchange_pair::config::{AssetMetadata, PoolConfig, ShareToken};
/// use exchange_pair::domain::{Address, Amount, AssetPair, Deposit, Shares, Timestamp};
/// use exchange_pair::ledger::InMemoryLedger;
/// use exchange_pair::pool::{ExchangePool, PoolState};
/// use exchange_pair::traits::{EventLog, ManualClock};
///
/// let base = Address::from_bytes([1u8; 32]);
/// let paired = Address::from_bytes([2u8; 32]);
/// let pool_account = Address::from_bytes([9u8; 32]);
/// let alice = Address::from_bytes([7u8; 32]);
///
/// let pair = AssetPair::new(base, paired).expect("valid pair");
/// let meta = AssetMetadata::new("TKN", "Token").expect("valid metadata");
/// let config = PoolConfig::new(pair, pool_account, ShareToken::for_paired_asset(&meta))
///     .expect("valid config");
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&base, &alice, Amount::new(1_000)).expect("mint");
/// ledger.mint(&paired, &alice, Amount::new(1_000)).expect("mint");
/// ledger.approve(&base, &alice, &pool_account, Amount::new(1_000));
/// ledger.approve(&paired, &alice, &pool_account, Amount::new(1_000));
///
/// let clock = ManualClock::at(Timestamp::new(100));
/// let mut pool = ExchangePool::new(config, ledger, clock, EventLog::new()).expect("pool");
/// assert_eq!(pool.state(), PoolState::Empty);
///
/// let receipt = pool
///     .deposit(alice, Deposit::new(Amount::new(500), Shares::new(500), Amount::new(400), Timestamp::new(200)))
///     .expect("deposit");
/// assert_eq!(receipt.shares_minted(), Shares::new(500));
/// assert_eq!(pool.state(), PoolState::Active);
/// ```
#[derive(Debug)]
pub struct ExchangePool<L, C = SystemClock, E = EventLog>
where
    L: AssetLedger,
    C: Clock,
    E: EventSink,
{
    config: PoolConfig,
    ledger: L,
    clock: C,
    events: E,
    pub(super) reserves: ReservePair,
    pub(super) shares: ShareRegistry,
}

impl<L: AssetLedger> ExchangePool<L> {
    /// Creates a pool on the wall clock that records events in an
    /// [`EventLog`].
    ///
    /// # Errors
    ///
    /// Same as [`ExchangePool::new`].
    pub fn with_ledger(config: PoolConfig, ledger: L) -> Result<Self> {
        Self::new(config, ledger, SystemClock, EventLog::new())
    }
}

impl<L, C, E> ExchangePool<L, C, E>
where
    L: AssetLedger,
    C: Clock,
    E: EventSink,
{
    /// Creates an empty pool.
    ///
    /// The cached reserves start as whatever the ledger already reports for
    /// the pool account; with no shares outstanding the pool is
    /// [`PoolState::Empty`] regardless.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    pub fn new(config: PoolConfig, ledger: L, clock: C, events: E) -> Result<Self> {
        config.validate()?;
        let mut pool = Self {
            config,
            ledger,
            clock,
            events,
            reserves: ReservePair::EMPTY,
            shares: ShareRegistry::new(),
        };
        pool.reserves = pool.observed_reserves();
        tracing::debug!(
            pool = %pool.config.pool_account(),
            share_symbol = pool.config.share_token().symbol(),
            reserves = %pool.reserves,
            "pool created"
        );
        Ok(pool)
    }

    // -- accessors ----------------------------------------------------------

    /// Pool configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// The traded assets.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        self.config.pair()
    }

    /// Cached reserves as of the last operation or [`sync`](Self::sync).
    #[must_use]
    pub const fn reserves(&self) -> ReservePair {
        self.reserves
    }

    /// Outstanding shares.
    pub const fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    /// Shares held by `holder`.
    pub fn shares_of(&self, holder: &Address) -> Shares {
        self.shares.balance_of(holder)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PoolState {
        if self.shares.is_empty() {
            PoolState::Empty
        } else {
            PoolState::Active
        }
    }

    /// The ledger the pool settles against.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, for the host to fund accounts and set
    /// allowances.  Any change to the pool account's balances is picked up
    /// by the next operation.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The clock deadlines are checked against.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The event sink.
    #[must_use]
    pub const fn events(&self) -> &E {
        &self.events
    }

    /// Mutable access to the event sink.
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    // -- reserve observation ------------------------------------------------

    /// Ledger balances of the pool account, without touching the cache.
    #[must_use]
    pub fn observed_reserves(&self) -> ReservePair {
        let pool = self.config.pool_account();
        let pair = self.config.pair();
        ReservePair::new(
            self.ledger.balance_of(&pair.base(), &pool),
            self.ledger.balance_of(&pair.paired(), &pool),
        )
    }

    /// Re-reads the ledger balances into the cached reserves and returns
    /// them.
    ///
    /// Every mutating operation performs the same observation before
    /// pricing.  Calling this directly is only needed to refresh
    /// [`reserves`](Self::reserves) after outside transfers.
    pub fn sync(&mut self) -> ReservePair {
        self.observe()
    }

    fn observe(&mut self) -> ReservePair {
        let observed = self.current_reserves();
        self.reserves = observed;
        observed
    }

    /// Ledger balances an operation prices against.  The cache is written
    /// only when the operation settles.
    pub(super) fn current_reserves(&self) -> ReservePair {
        let observed = self.observed_reserves();
        if observed != self.reserves {
            tracing::warn!(
                cached = %self.reserves,
                observed = %observed,
                "ledger balances differ from cached reserves; using ledger"
            );
        }
        observed
    }

    // -- quotes -------------------------------------------------------------

    /// Output an exact-input swap would pay at the current ledger balances.
    ///
    /// # Errors
    ///
    /// Asset errors from [`AssetPair::direction`] and pricing errors from
    /// [`pricing::output_given_input`].
    pub fn quote_exact_input(
        &self,
        asset_in: &Address,
        amount_in: Amount,
        asset_out: &Address,
    ) -> Result<Amount> {
        let side_in = self.pair().direction(asset_in, asset_out)?;
        let (reserve_in, reserve_out) = self.observed_reserves().oriented(side_in);
        pricing::output_given_input(amount_in, reserve_in, reserve_out)
    }

    /// Input an exact-output swap would require at the current ledger
    /// balances.
    ///
    /// # Errors
    ///
    /// Asset errors from [`AssetPair::direction`] and pricing errors from
    /// [`pricing::input_given_output`].
    pub fn quote_exact_output(
        &self,
        asset_in: &Address,
        asset_out: &Address,
        amount_out: Amount,
    ) -> Result<Amount> {
        let side_in = self.pair().direction(asset_in, asset_out)?;
        let (reserve_in, reserve_out) = self.observed_reserves().oriented(side_in);
        pricing::input_given_output(amount_out, reserve_in, reserve_out)
    }

    /// Base amount required and shares minted for depositing
    /// `desired_amount_b` of the paired asset into an active pool.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] if `desired_amount_b` is zero.
    /// - [`ExchangeError::InvalidReserve`] if the pool is empty (there is no
    ///   ratio to quote against) or a reserve is zero.
    /// - [`ExchangeError::Overflow`] if a result exceeds 128 bits.
    pub fn quote_deposit(&self, desired_amount_b: Amount) -> Result<(Amount, Shares)> {
        guard::require_positive(desired_amount_b, "desired paired amount")?;
        if self.state() == PoolState::Empty {
            return Err(ExchangeError::InvalidReserve);
        }
        proportional_deposit(
            desired_amount_b,
            self.observed_reserves(),
            self.shares.total(),
        )
    }

    /// Amounts paid out for burning `shares`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] if `shares` is zero.
    /// - [`ExchangeError::InsufficientShares`] if `shares` exceeds the
    ///   total supply.
    pub fn quote_withdraw(&self, shares: Shares) -> Result<(Amount, Amount)> {
        guard::require_positive_shares(shares, "shares to burn")?;
        let total = self.shares.total();
        if shares > total {
            return Err(ExchangeError::InsufficientShares {
                available: total.get(),
                requested: shares.get(),
            });
        }
        proportional_withdrawal(shares, self.observed_reserves(), total)
    }

    // -- share transfers ----------------------------------------------------

    /// Moves `shares` from `from` to `to`.  Reserves and the total supply
    /// are unchanged; no ledger transfer takes place.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] if `shares` is zero.
    /// - [`ExchangeError::InvalidAddress`] if `to` is the zero address.
    /// - [`ExchangeError::InsufficientShares`] if `from` holds too few.
    pub fn transfer_shares(&mut self, from: Address, to: Address, shares: Shares) -> Result<()> {
        guard::require_positive_shares(shares, "shares to transfer")?;
        self.shares.transfer(&from, to, shares)?;
        tracing::debug!(%from, %to, %shares, "shares transferred");
        self.emit(SharesTransferred { from, to, shares });
        Ok(())
    }

    // -- settlement ---------------------------------------------------------

    pub(super) fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub(super) fn snapshot(&self, with_shares: bool) -> Snapshot {
        Snapshot {
            reserves: self.reserves,
            shares: with_shares.then(|| self.shares.clone()),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.reserves = snapshot.reserves;
        if let Some(shares) = snapshot.shares {
            self.shares = shares;
        }
    }

    pub(super) fn batch(&self) -> TransferBatch {
        TransferBatch::new(self.config.pool_account())
    }

    /// Submits `batch` to the ledger.  On failure the bookkeeping captured
    /// in `snapshot` is restored, the reserves are re-read from the ledger,
    /// and the ledger error returned.
    pub(super) fn settle_or_restore(
        &mut self,
        batch: &TransferBatch,
        snapshot: Snapshot,
    ) -> Result<()> {
        if let Err(err) = self.ledger.settle(batch) {
            if matches!(err, LedgerError::PartialSettlement { .. }) {
                tracing::error!(error = %err, legs = batch.len(), "settlement left transfers applied");
            } else {
                tracing::warn!(error = %err, legs = batch.len(), "settlement failed; restoring pool state");
            }
            self.restore(snapshot);
            self.observe();
            return Err(err.into());
        }
        // Reconcile with what the ledger actually booked.
        self.observe();
        Ok(())
    }

    pub(super) fn emit(&mut self, event: impl Into<PoolEvent>) {
        self.events.emit(event.into());
    }
}

/// Base amount required and shares minted for `desired_amount_b` against
/// the given reserves and supply.
///
/// The base amount rounds up and the shares round down, so the depositor
/// never gains against existing holders.
pub(super) fn proportional_deposit(
    desired_amount_b: Amount,
    reserves: ReservePair,
    total: Shares,
) -> Result<(Amount, Shares)> {
    if reserves.has_zero_side() {
        return Err(ExchangeError::InvalidReserve);
    }
    let reserve_b = reserves.reserve_b().get();
    let required_a = pricing::proportional(
        desired_amount_b.get(),
        reserves.reserve_a().get(),
        reserve_b,
        Rounding::Up,
    )?;
    let minted = pricing::proportional(
        desired_amount_b.get(),
        total.get(),
        reserve_b,
        Rounding::Down,
    )?;
    Ok((Amount::new(required_a), Shares::new(minted)))
}

/// Amounts paid for burning `shares` out of `total`, both rounded down.
pub(super) fn proportional_withdrawal(
    shares: Shares,
    reserves: ReservePair,
    total: Shares,
) -> Result<(Amount, Amount)> {
    let amount_a = pricing::proportional(
        shares.get(),
        reserves.reserve_a().get(),
        total.get(),
        Rounding::Down,
    )?;
    let amount_b = pricing::proportional(
        shares.get(),
        reserves.reserve_b().get(),
        total.get(),
        Rounding::Down,
    )?;
    Ok((Amount::new(amount_a), Amount::new(amount_b)))
}

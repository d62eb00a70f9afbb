//! The fungible-asset ledger the pool settles against.
//!
//! The pool never moves assets itself.  It asks an [`AssetLedger`] to pull
//! the caller's payment into the pool account and to push the payout back
//! out, and it treats the ledger's balances for the pool account as the
//! authoritative reserves.
//!
//! # Atomic settlement
//!
//! Each operation hands the ledger one [`TransferBatch`] through
//! [`AssetLedger::settle`].  The batch either applies completely or not at
//! all.  Ledgers with native multi-transfer transactions should override
//! `settle`; the provided implementation applies legs in order and, if a
//! leg fails, reverses the legs already applied.

use crate::domain::{Address, Amount};
use crate::ledger::LedgerError;

/// One movement of an asset between a counterparty and the pool account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Move `amount` of `asset` from `from` into the pool account, spending
    /// the allowance `from` granted the pool.
    Pull {
        /// Asset moved.
        asset: Address,
        /// Payer.
        from: Address,
        /// Amount moved.
        amount: Amount,
    },
    /// Move `amount` of `asset` from the pool account to `to`.
    Push {
        /// Asset moved.
        asset: Address,
        /// Recipient.
        to: Address,
        /// Amount moved.
        amount: Amount,
    },
}

/// The transfers of one pool operation, settled as a unit.
///
/// Pulls are always listed before pushes, so the pool holds the incoming
/// assets before it pays anything out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferBatch {
    pool: Address,
    pulls: Vec<Transfer>,
    pushes: Vec<Transfer>,
}

impl TransferBatch {
    /// Starts an empty batch for the given pool account.
    #[must_use]
    pub const fn new(pool: Address) -> Self {
        Self {
            pool,
            pulls: Vec::new(),
            pushes: Vec::new(),
        }
    }

    /// Adds a pull into the pool.  Zero amounts are skipped.
    #[must_use]
    pub fn pull(mut self, asset: Address, from: Address, amount: Amount) -> Self {
        if !amount.is_zero() {
            self.pulls.push(Transfer::Pull {
                asset,
                from,
                amount,
            });
        }
        self
    }

    /// Adds a push out of the pool.  Zero amounts are skipped.
    #[must_use]
    pub fn push(mut self, asset: Address, to: Address, amount: Amount) -> Self {
        if !amount.is_zero() {
            self.pushes.push(Transfer::Push { asset, to, amount });
        }
        self
    }

    /// The pool account both sides of the batch settle against.
    #[must_use]
    pub const fn pool(&self) -> Address {
        self.pool
    }

    /// Legs in settlement order: pulls, then pushes.
    pub fn legs(&self) -> impl Iterator<Item = &Transfer> + '_ {
        self.pulls.iter().chain(self.pushes.iter())
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pulls.len() + self.pushes.len()
    }

    /// Returns `true` if there is nothing to settle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A synchronous fungible-asset ledger.
///
/// Every method either succeeds completely or returns an error without
/// changing any balance.
pub trait AssetLedger {
    /// Balance of `asset` held by `owner`.
    fn balance_of(&self, asset: &Address, owner: &Address) -> Amount;

    /// Moves `amount` of `asset` from `owner` to `spender`, consuming the
    /// allowance `owner` granted `spender`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientAllowance`],
    /// [`LedgerError::InsufficientBalance`], or another ledger-specific
    /// rejection.
    fn transfer_from(
        &mut self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `asset` from `from` (the calling account) to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] or another ledger-specific
    /// rejection.
    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Applies every leg of `batch`, reversing the applied ones in reverse
    /// order if a later leg fails.
    ///
    /// The provided implementation compensates with ordinary transfers, so
    /// spent allowances are not restored.  Ledgers that can stage a batch
    /// should override it.
    ///
    /// # Errors
    ///
    /// Returns the failing leg's error once every applied leg has been
    /// reversed.  If a reversal is itself rejected, returns
    /// [`LedgerError::PartialSettlement`] carrying the original error and
    /// the number of legs left in effect.
    fn settle(&mut self, batch: &TransferBatch) -> Result<(), LedgerError> {
        let pool = batch.pool();
        let mut applied: Vec<Transfer> = Vec::with_capacity(batch.len());
        for leg in batch.legs() {
            let outcome = match *leg {
                Transfer::Pull {
                    asset,
                    from,
                    amount,
                } => self.transfer_from(&asset, &from, &pool, amount),
                Transfer::Push { asset, to, amount } => {
                    self.transfer(&asset, &pool, &to, amount)
                }
            };
            if let Err(err) = outcome {
                tracing::warn!(error = %err, applied = applied.len(), "settlement leg failed; reversing");
                let mut unreversed = 0usize;
                for done in applied.iter().rev() {
                    let reversal = match *done {
                        Transfer::Pull {
                            asset,
                            from,
                            amount,
                        } => self.transfer(&asset, &pool, &from, amount),
                        Transfer::Push { asset, to, amount } => {
                            self.transfer(&asset, &to, &pool, amount)
                        }
                    };
                    if let Err(reversal_err) = reversal {
                        tracing::error!(error = %reversal_err, "failed to reverse settlement leg");
                        unreversed += 1;
                    }
                }
                if unreversed > 0 {
                    return Err(LedgerError::PartialSettlement {
                        cause: Box::new(err),
                        unreversed,
                    });
                }
                return Err(err);
            }
            applied.push(*leg);
        }
        Ok(())
    }
}

impl<L: AssetLedger + ?Sized> AssetLedger for &mut L {
    fn balance_of(&self, asset: &Address, owner: &Address) -> Amount {
        (**self).balance_of(asset, owner)
    }

    fn transfer_from(
        &mut self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        (**self).transfer_from(asset, owner, spender, amount)
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        (**self).transfer(asset, from, to, amount)
    }

    fn settle(&mut self, batch: &TransferBatch) -> Result<(), LedgerError> {
        (**self).settle(batch)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    /// Forwards single transfers and keeps the provided `settle`.  Every
    /// `transfer` to `refuse_to` is rejected.
    struct LegByLeg {
        inner: InMemoryLedger,
        refuse_to: Option<Address>,
    }

    impl LegByLeg {
        fn new(inner: InMemoryLedger) -> Self {
            Self {
                inner,
                refuse_to: None,
            }
        }
    }

    impl AssetLedger for LegByLeg {
        fn balance_of(&self, asset: &Address, owner: &Address) -> Amount {
            self.inner.balance_of(asset, owner)
        }

        fn transfer_from(
            &mut self,
            asset: &Address,
            owner: &Address,
            spender: &Address,
            amount: Amount,
        ) -> Result<(), LedgerError> {
            self.inner.transfer_from(asset, owner, spender, amount)
        }

        fn transfer(
            &mut self,
            asset: &Address,
            from: &Address,
            to: &Address,
            amount: Amount,
        ) -> Result<(), LedgerError> {
            if self.refuse_to == Some(*to) {
                return Err(LedgerError::Rejected("refused"));
            }
            self.inner.transfer(asset, from, to, amount)
        }
    }

    #[test]
    fn provided_settle_reverses_applied_legs() {
        let pool = addr(30);
        let payer = addr(10);
        let mut inner = InMemoryLedger::new();
        let Ok(()) = inner.mint(&addr(1), &payer, Amount::new(1_000)) else {
            panic!("mint");
        };
        inner.approve(&addr(1), &payer, &pool, Amount::new(100));
        let mut ledger = LegByLeg::new(inner);

        // The pull lands, then the push fails: the pool holds none of asset 2.
        let batch = TransferBatch::new(pool)
            .pull(addr(1), payer, Amount::new(100))
            .push(addr(2), payer, Amount::new(5));
        let result = ledger.settle(&batch);
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(ledger.balance_of(&addr(1), &payer), Amount::new(1_000));
        assert_eq!(ledger.balance_of(&addr(1), &pool), Amount::ZERO);
    }

    #[test]
    fn provided_settle_reports_unreversed_legs() {
        let pool = addr(30);
        let payer = addr(10);
        let mut inner = InMemoryLedger::new();
        let Ok(()) = inner.mint(&addr(1), &payer, Amount::new(1_000)) else {
            panic!("mint");
        };
        let Ok(()) = inner.mint(&addr(2), &pool, Amount::new(50)) else {
            panic!("mint");
        };
        inner.approve(&addr(1), &payer, &pool, Amount::new(100));
        let mut ledger = LegByLeg::new(inner);
        ledger.refuse_to = Some(payer);

        // The push is refused, and so is handing the pulled amount back.
        let batch = TransferBatch::new(pool)
            .pull(addr(1), payer, Amount::new(100))
            .push(addr(2), payer, Amount::new(5));
        let Err(LedgerError::PartialSettlement { cause, unreversed }) = ledger.settle(&batch) else {
            panic!("expected PartialSettlement");
        };
        assert_eq!(*cause, LedgerError::Rejected("refused"));
        assert_eq!(unreversed, 1);
        assert_eq!(ledger.balance_of(&addr(1), &payer), Amount::new(900));
        assert_eq!(ledger.balance_of(&addr(1), &pool), Amount::new(100));
    }

    #[test]
    fn mutable_reference_is_a_ledger() {
        let mut inner = InMemoryLedger::new();
        let Ok(()) = inner.mint(&addr(1), &addr(2), Amount::new(7)) else {
            panic!("mint");
        };
        let mut by_ref = &mut inner;
        let Ok(()) = AssetLedger::transfer(&mut by_ref, &addr(1), &addr(2), &addr(3), Amount::new(7))
        else {
            panic!("transfer");
        };
        assert_eq!(inner.balance_of(&addr(1), &addr(3)), Amount::new(7));
    }

    #[test]
    fn batch_orders_pulls_before_pushes() {
        let batch = TransferBatch::new(addr(9))
            .push(addr(1), addr(3), Amount::new(5))
            .pull(addr(2), addr(3), Amount::new(7));
        let legs: Vec<_> = batch.legs().copied().collect();
        assert!(matches!(legs[0], Transfer::Pull { .. }));
        assert!(matches!(legs[1], Transfer::Push { .. }));
    }

    #[test]
    fn batch_skips_zero_legs() {
        let batch = TransferBatch::new(addr(9))
            .pull(addr(1), addr(3), Amount::ZERO)
            .push(addr(2), addr(3), Amount::ZERO);
        assert!(batch.is_empty());
    }
}

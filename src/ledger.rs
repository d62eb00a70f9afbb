//! Reference ledger and ledger errors.
//!
//! [`InMemoryLedger`] implements [`AssetLedger`] with plain maps.  It backs
//! the test suite and the demo, and is a usable ledger for off-chain
//! simulation.  Production hosts plug in their own `AssetLedger`.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount};
use crate::traits::{AssetLedger, Transfer, TransferBatch};

/// Rejection reported by an [`AssetLedger`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The payer holds less than the transfer amount.
    #[error("insufficient balance: has {available}, needs {required}")]
    InsufficientBalance {
        /// Current balance.
        available: u128,
        /// Transfer amount.
        required: u128,
    },

    /// The spender's allowance is below the transfer amount.
    #[error("insufficient allowance: has {available}, needs {required}")]
    InsufficientAllowance {
        /// Current allowance.
        available: u128,
        /// Transfer amount.
        required: u128,
    },

    /// Crediting the recipient would overflow its balance.
    #[error("recipient balance overflow")]
    BalanceOverflow,

    /// Source and destination are the same account.
    #[error("source and destination are the same account")]
    SelfTransfer,

    /// The host ledger refused the transfer for its own reasons.
    #[error("transfer rejected: {0}")]
    Rejected(&'static str),

    /// A settlement leg failed and some already-applied legs could not be
    /// reversed.  Funds have moved even though the batch failed.
    #[error("settlement failed ({cause}) and {unreversed} applied leg(s) could not be reversed")]
    PartialSettlement {
        /// Error of the leg that stopped the batch.
        cause: Box<LedgerError>,
        /// Number of applied legs still in effect.
        unreversed: usize,
    },
}

/// An in-memory multi-asset ledger with ERC-20 style allowances.
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::{Address, Amount};
/// use exchange_pair::ledger::InMemoryLedger;
/// use exchange_pair::traits::AssetLedger;
///
/// let asset = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([2u8; 32]);
/// let bob = Address::from_bytes([3u8; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&asset, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(&asset, &alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(&asset, &bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<(Address, Address), u128>,
    allowances: BTreeMap<(Address, Address, Address), u128>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `owner` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BalanceOverflow`] if the balance would overflow.
    pub fn mint(
        &mut self,
        asset: &Address,
        owner: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let balance = self.balances.entry((*asset, *owner)).or_insert(0);
        *balance = balance
            .checked_add(amount.get())
            .ok_or(LedgerError::BalanceOverflow)?;
        Ok(())
    }

    /// Sets the allowance `owner` grants `spender` for `asset`.
    pub fn approve(&mut self, asset: &Address, owner: &Address, spender: &Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(*asset, *owner, *spender));
        } else {
            self.allowances
                .insert((*asset, *owner, *spender), amount.get());
        }
    }

    /// Remaining allowance `owner` granted `spender` for `asset`.
    #[must_use]
    pub fn allowance(&self, asset: &Address, owner: &Address, spender: &Address) -> Amount {
        Amount::new(
            self.allowances
                .get(&(*asset, *owner, *spender))
                .copied()
                .unwrap_or(0),
        )
    }

    fn commit(&mut self, changes: Changes) {
        let (balances, allowances) = changes;
        for ((asset, owner), balance) in balances {
            if balance == 0 {
                self.balances.remove(&(asset, owner));
            } else {
                self.balances.insert((asset, owner), balance);
            }
        }
        for ((asset, owner, spender), left) in allowances {
            self.approve(&asset, &owner, &spender, Amount::new(left));
        }
    }
}

type Changes = (
    BTreeMap<(Address, Address), u128>,
    BTreeMap<(Address, Address, Address), u128>,
);

/// Pending balance and allowance changes over a ledger.  Only entries a
/// transfer touches are held; everything else reads through.
struct Staged<'a> {
    ledger: &'a InMemoryLedger,
    balances: BTreeMap<(Address, Address), u128>,
    allowances: BTreeMap<(Address, Address, Address), u128>,
}

impl<'a> Staged<'a> {
    fn new(ledger: &'a InMemoryLedger) -> Self {
        Self {
            ledger,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    fn balance(&self, asset: &Address, owner: &Address) -> u128 {
        self.balances
            .get(&(*asset, *owner))
            .copied()
            .unwrap_or_else(|| self.ledger.balance_of(asset, owner).get())
    }

    fn allowance(&self, asset: &Address, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(*asset, *owner, *spender))
            .copied()
            .unwrap_or_else(|| self.ledger.allowance(asset, owner, spender).get())
    }

    fn move_balance(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let available = self.balance(asset, from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                available,
                required: amount,
            })?;
        let credited = self
            .balance(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        self.balances.insert((*asset, *from), remaining);
        self.balances.insert((*asset, *to), credited);
        Ok(())
    }

    fn spend(
        &mut self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance(asset, owner, spender);
        let left = allowance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                available: allowance,
                required: amount,
            })?;
        self.move_balance(asset, owner, spender, amount)?;
        self.allowances.insert((*asset, *owner, *spender), left);
        Ok(())
    }

    fn apply(&mut self, pool: &Address, leg: &Transfer) -> Result<(), LedgerError> {
        match *leg {
            Transfer::Pull {
                asset,
                from,
                amount,
            } => self.spend(&asset, &from, pool, amount.get()),
            Transfer::Push { asset, to, amount } => {
                self.move_balance(&asset, pool, &to, amount.get())
            }
        }
    }

    fn into_changes(self) -> Changes {
        (self.balances, self.allowances)
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, asset: &Address, owner: &Address) -> Amount {
        Amount::new(self.balances.get(&(*asset, *owner)).copied().unwrap_or(0))
    }

    fn transfer_from(
        &mut self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut staged = Staged::new(self);
        staged.spend(asset, owner, spender, amount.get())?;
        let changes = staged.into_changes();
        self.commit(changes);
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut staged = Staged::new(self);
        staged.move_balance(asset, from, to, amount.get())?;
        let changes = staged.into_changes();
        self.commit(changes);
        Ok(())
    }

    /// Stages the touched balances and allowances and commits them only if
    /// every leg succeeds, so allowances are untouched by a failed batch too.
    fn settle(&mut self, batch: &TransferBatch) -> Result<(), LedgerError> {
        let pool = batch.pool();
        let mut staged = Staged::new(self);
        for leg in batch.legs() {
            staged.apply(&pool, leg)?;
        }
        let changes = staged.into_changes();
        self.commit(changes);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn funded() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(&addr(1), &addr(10), Amount::new(1_000)) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = funded();
        let Ok(()) = ledger.transfer(&addr(1), &addr(10), &addr(11), Amount::new(300)) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(&addr(1), &addr(10)), Amount::new(700));
        assert_eq!(ledger.balance_of(&addr(1), &addr(11)), Amount::new(300));
    }

    #[test]
    fn transfer_rejects_overdraft() {
        let mut ledger = funded();
        let before = ledger.clone();
        let result = ledger.transfer(&addr(1), &addr(10), &addr(11), Amount::new(1_001));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { available: 1_000, required: 1_001 })
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut ledger = funded();
        ledger.approve(&addr(1), &addr(10), &addr(20), Amount::new(500));
        let Ok(()) = ledger.transfer_from(&addr(1), &addr(10), &addr(20), Amount::new(200)) else {
            panic!("transfer_from");
        };
        assert_eq!(ledger.allowance(&addr(1), &addr(10), &addr(20)), Amount::new(300));
        assert_eq!(ledger.balance_of(&addr(1), &addr(20)), Amount::new(200));
    }

    #[test]
    fn transfer_from_without_allowance() {
        let mut ledger = funded();
        let result = ledger.transfer_from(&addr(1), &addr(10), &addr(20), Amount::new(1));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn self_transfer_rejected() {
        let mut ledger = funded();
        assert!(matches!(
            ledger.transfer(&addr(1), &addr(10), &addr(10), Amount::new(1)),
            Err(LedgerError::SelfTransfer)
        ));
    }

    #[test]
    fn failed_settle_leaves_ledger_untouched() {
        let pool = addr(30);
        let mut ledger = funded();
        ledger.approve(&addr(1), &addr(10), &pool, Amount::new(100));
        let before = ledger.clone();

        // The pull succeeds, the push fails because the pool holds no asset 2.
        let batch = TransferBatch::new(pool)
            .pull(addr(1), addr(10), Amount::new(100))
            .push(addr(2), addr(10), Amount::new(5));
        let result = ledger.settle(&batch);
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(ledger, before);
        assert_eq!(ledger.allowance(&addr(1), &addr(10), &pool), Amount::new(100));
    }

    #[test]
    fn settle_applies_everything() {
        let pool = addr(30);
        let mut ledger = funded();
        let Ok(()) = ledger.mint(&addr(2), &pool, Amount::new(50)) else {
            panic!("mint");
        };
        ledger.approve(&addr(1), &addr(10), &pool, Amount::new(100));
        let batch = TransferBatch::new(pool)
            .pull(addr(1), addr(10), Amount::new(100))
            .push(addr(2), addr(10), Amount::new(5));
        let Ok(()) = ledger.settle(&batch) else {
            panic!("settle");
        };
        assert_eq!(ledger.balance_of(&addr(1), &pool), Amount::new(100));
        assert_eq!(ledger.balance_of(&addr(2), &addr(10)), Amount::new(5));
    }

    #[test]
    fn settle_legs_see_earlier_legs() {
        let pool = addr(30);
        let mut ledger = funded();
        for who in 40..60 {
            let Ok(()) = ledger.mint(&addr(1), &addr(who), Amount::new(7)) else {
                panic!("mint");
            };
        }
        ledger.approve(&addr(1), &addr(10), &pool, Amount::new(100));

        // The pool starts with none of asset 1; the push spends what the pull brought in.
        let batch = TransferBatch::new(pool)
            .pull(addr(1), addr(10), Amount::new(100))
            .push(addr(1), addr(11), Amount::new(60));
        let Ok(()) = ledger.settle(&batch) else {
            panic!("settle");
        };
        assert_eq!(ledger.balance_of(&addr(1), &pool), Amount::new(40));
        assert_eq!(ledger.balance_of(&addr(1), &addr(10)), Amount::new(900));
        assert_eq!(ledger.balance_of(&addr(1), &addr(11)), Amount::new(60));
        assert_eq!(ledger.allowance(&addr(1), &addr(10), &pool), Amount::ZERO);
        assert_eq!(ledger.balance_of(&addr(1), &addr(45)), Amount::new(7));
    }
}

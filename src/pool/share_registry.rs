//! Liquidity-share balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Shares};
use crate::error::{ExchangeError, Result};
use crate::math::CheckedArithmetic;

/// Total share supply and per-holder balances.
///
/// Invariant: `total` equals the sum of all balances.  Holders whose
/// balance drops to zero are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRegistry {
    total: Shares,
    balances: BTreeMap<Address, Shares>,
}

impl ShareRegistry {
    /// Creates a registry with no shares outstanding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding shares.
    pub const fn total(&self) -> Shares {
        self.total
    }

    /// Returns `true` if no shares are outstanding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total.is_zero()
    }

    /// Shares held by `holder`.
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or(Shares::ZERO)
    }

    /// Number of holders with a non-zero balance.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.balances.len()
    }

    /// Credits new shares to `holder`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAddress`] if `holder` is the zero address.
    /// - [`ExchangeError::Overflow`] if the total supply would overflow.
    pub fn mint(&mut self, holder: Address, shares: Shares) -> Result<()> {
        if holder.is_zero() {
            return Err(ExchangeError::InvalidAddress(
                "cannot mint shares to the zero address",
            ));
        }
        let total = self.total.safe_add(&shares)?;
        let balance = self.balance_of(&holder).safe_add(&shares)?;
        self.total = total;
        self.set_balance(holder, balance);
        Ok(())
    }

    /// Removes shares from `holder` and from the total supply.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InsufficientShares`] if `holder` owns fewer
    /// than `shares`.
    pub fn burn(&mut self, holder: &Address, shares: Shares) -> Result<()> {
        let balance = self.debit(holder, shares)?;
        let total = self.total.safe_sub(&shares)?;
        self.total = total;
        self.set_balance(*holder, balance);
        Ok(())
    }

    /// Moves shares between holders.  The total supply is unchanged.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAddress`] if `to` is the zero address.
    /// - [`ExchangeError::InsufficientShares`] if `from` owns fewer than
    ///   `shares`.
    pub fn transfer(&mut self, from: &Address, to: Address, shares: Shares) -> Result<()> {
        if to.is_zero() {
            return Err(ExchangeError::InvalidAddress(
                "cannot transfer shares to the zero address",
            ));
        }
        let from_balance = self.debit(from, shares)?;
        if *from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(&to).safe_add(&shares)?;
        self.set_balance(*from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    /// `holder`'s balance after removing `shares`, without applying it.
    fn debit(&self, holder: &Address, shares: Shares) -> Result<Shares> {
        let available = self.balance_of(holder);
        available
            .checked_sub(&shares)
            .ok_or(ExchangeError::InsufficientShares {
                available: available.get(),
                requested: shares.get(),
            })
    }

    fn set_balance(&mut self, holder: Address, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, balance);
        }
    }
}

//! Shared setup for pool unit and property tests.

#![allow(clippy::panic)]

use crate::config::{AssetMetadata, PoolConfig, ShareToken};
use crate::domain::{Address, Amount, AssetPair, Deposit, Shares, Timestamp};
use crate::ledger::InMemoryLedger;
use crate::traits::{EventLog, ManualClock};

use super::ExchangePool;

pub(crate) const E18: u128 = 1_000_000_000_000_000_000;

/// Clock reading at pool creation.
pub(crate) const NOW: Timestamp = Timestamp::new(1_000);

/// A deadline comfortably after [`NOW`].
pub(crate) const DEADLINE: Timestamp = Timestamp::new(2_000);

pub(crate) type TestPool = ExchangePool<InMemoryLedger, ManualClock, EventLog>;

pub(crate) fn base() -> Address {
    Address::from_bytes([1u8; 32])
}

pub(crate) fn paired() -> Address {
    Address::from_bytes([2u8; 32])
}

pub(crate) fn pool_account() -> Address {
    Address::from_bytes([9u8; 32])
}

pub(crate) fn alice() -> Address {
    Address::from_bytes([7u8; 32])
}

pub(crate) fn bob() -> Address {
    Address::from_bytes([8u8; 32])
}

pub(crate) fn config() -> PoolConfig {
    let Ok(pair) = AssetPair::new(base(), paired()) else {
        panic!("valid pair");
    };
    let Ok(meta) = AssetMetadata::new("PRD", "Paired") else {
        panic!("valid metadata");
    };
    let Ok(cfg) = PoolConfig::new(pair, pool_account(), ShareToken::for_paired_asset(&meta)) else {
        panic!("valid config");
    };
    cfg
}

/// An empty pool and a handle on its clock.
pub(crate) fn empty_pool() -> (TestPool, ManualClock) {
    let clock = ManualClock::at(NOW);
    let Ok(pool) = ExchangePool::new(config(), InMemoryLedger::new(), clock.clone(), EventLog::new())
    else {
        panic!("valid pool");
    };
    (pool, clock)
}

/// Mints both assets to `who` and approves the pool for everything.
pub(crate) fn fund(pool: &mut TestPool, who: Address, base_amount: u128, paired_amount: u128) {
    let pool_acct = pool_account();
    let ledger = pool.ledger_mut();
    let Ok(()) = ledger.mint(&base(), &who, Amount::new(base_amount)) else {
        panic!("mint base");
    };
    let Ok(()) = ledger.mint(&paired(), &who, Amount::new(paired_amount)) else {
        panic!("mint paired");
    };
    ledger.approve(&base(), &who, &pool_acct, Amount::MAX);
    ledger.approve(&paired(), &who, &pool_acct, Amount::MAX);
}

/// A pool seeded by alice with `(reserve_a, reserve_b)`; bob holds
/// `trader_funds` of each asset.
pub(crate) fn seeded_pool(reserve_a: u128, reserve_b: u128, trader_funds: u128) -> TestPool {
    let (mut pool, _clock) = empty_pool();
    fund(&mut pool, alice(), reserve_a, reserve_b);
    fund(&mut pool, bob(), trader_funds, trader_funds);
    let request = Deposit::new(
        Amount::new(reserve_b),
        Shares::ZERO,
        Amount::new(reserve_a),
        DEADLINE,
    );
    let Ok(_) = pool.deposit(alice(), request) else {
        panic!("seed deposit");
    };
    pool
}

//! # Exchange Pair
//!
//! Pricing and reserve-accounting core of a two-asset constant-product
//! exchange pool.
//!
//! A pool holds reserves of a **base asset** (A) and a **paired asset** (B),
//! prices trades by the constant-product rule with a fixed 0.3% fee kept
//! in the pool, and tracks proportional ownership of the reserves through
//! liquidity shares.
//!
//! - [`pricing`]: forward and inverse fee-adjusted formulas.
//! - [`pool`]: the [`ExchangePool`](pool::ExchangePool) with its swap
//!   executor and liquidity manager.
//! - [`guard`]: deadline, zero-amount, slippage, and reserve-product
//!   checks.
//! - [`traits`]: the ledger, clock, and event-sink seams to the host.
//!
//! # Guarantees
//!
//! - The reserve product never decreases across a swap.
//! - Rounding always favours the pool.  Products are formed in 256 bits
//!   and a result that does not fit 128 bits is an error, never a
//!   truncation.
//! - Every operation is all-or-nothing: a failed operation leaves the pool,
//!   its shares, and the ledger unchanged.
//! - Cached reserves always equal the ledger balances of the pool account.
//!
//! # Quick Start
//!
//! ```rust
//! use exchange_pair::prelude::*;
//!
//! let base = Address::from_bytes([1u8; 32]);
//! let paired = Address::from_bytes([2u8; 32]);
//! let pool_account = Address::from_bytes([9u8; 32]);
//! let lp = Address::from_bytes([7u8; 32]);
//! let trader = Address::from_bytes([8u8; 32]);
//!
//! // 1. Describe the pool.
//! let pair = AssetPair::new(base, paired).expect("valid pair");
//! let meta = AssetMetadata::new("USDC", "USD Coin").expect("valid metadata");
//! let config = PoolConfig::new(pair, pool_account, ShareToken::for_paired_asset(&meta))
//!     .expect("valid config");
//!
//! // 2. Fund the accounts on a ledger and approve the pool.
//! let mut ledger = InMemoryLedger::new();
//! for who in [lp, trader] {
//!     ledger.mint(&base, &who, Amount::new(1_000_000)).expect("mint");
//!     ledger.mint(&paired, &who, Amount::new(1_000_000)).expect("mint");
//!     ledger.approve(&base, &who, &pool_account, Amount::MAX);
//!     ledger.approve(&paired, &who, &pool_account, Amount::MAX);
//! }
//!
//! // 3. Open the pool and trade.
//! let clock = ManualClock::at(Timestamp::new(1_000));
//! let mut pool = ExchangePool::new(config, ledger, clock, EventLog::new()).expect("pool");
//! let deadline = Timestamp::new(2_000);
//! pool.deposit(lp, Deposit::new(Amount::new(100_000), Shares::ZERO, Amount::new(100_000), deadline))
//!     .expect("deposit");
//!
//! let receipt = pool
//!     .sell_base_exact(trader, Amount::new(1_000), Amount::new(980), deadline)
//!     .expect("swap");
//! assert_eq!(receipt.amount_out(), Amount::new(987));
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod pricing;
pub mod traits;

//! The exchange pool and its bookkeeping.
//!
//! - [`ExchangePool`]: owns the reserves, the share registry, and the
//!   collaborators; exposes swaps, deposits, withdrawals, and quotes.
//! - [`ReservePair`]: cached reserve balances.
//! - [`ShareRegistry`]: liquidity-share supply and balances.

mod exchange_pool;
mod liquidity;
mod reserve_pair;
mod share_registry;
mod swap;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod proptest_properties;

pub use exchange_pool::{ExchangePool, PoolState};
pub use reserve_pair::ReservePair;
pub use share_registry::ShareRegistry;

//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint for one pool.
//! [`ShareToken`] labels its liquidity shares, derived from the paired
//! asset's [`AssetMetadata`].

mod pool_config;
mod share_token;

pub use pool_config::PoolConfig;
pub use share_token::{AssetMetadata, ShareToken, SHARE_SYMBOL_SUFFIX};

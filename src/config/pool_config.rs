//! Configuration of a single exchange pool.

use serde::{Deserialize, Serialize};

use super::ShareToken;
use crate::domain::{Address, AssetPair};
use crate::error::{ExchangeError, Result};

/// Immutable parameters of one pool: which assets it trades, which ledger
/// account holds its reserves, and how its share token is labelled.
///
/// The fee is not configurable; every pool prices at 997/1000.
///
/// # Validation
///
/// - The pair is validated as in [`AssetPair::new`].
/// - The pool account must be non-zero and must not be one of the traded
///   asset addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pair: AssetPair,
    pool_account: Address,
    share_token: ShareToken,
}

impl PoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAddress`] if the pair or pool account
    /// is invalid.
    pub fn new(pair: AssetPair, pool_account: Address, share_token: ShareToken) -> Result<Self> {
        let config = Self {
            pair,
            pool_account,
            share_token,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.  Call this after
    /// deserializing a configuration from an untrusted source.
    ///
    /// # Errors
    ///
    /// Same as [`PoolConfig::new`].
    pub fn validate(&self) -> Result<()> {
        self.pair.validate()?;
        if self.pool_account.is_zero() {
            return Err(ExchangeError::InvalidAddress(
                "pool account is the zero address",
            ));
        }
        if self.pair.contains(&self.pool_account) {
            return Err(ExchangeError::InvalidAddress(
                "pool account collides with a traded asset",
            ));
        }
        Ok(())
    }

    /// The traded assets.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Ledger account holding the reserves.
    #[must_use]
    pub const fn pool_account(&self) -> Address {
        self.pool_account
    }

    /// Share token descriptor.
    #[must_use]
    pub const fn share_token(&self) -> &ShareToken {
        &self.share_token
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::AssetMetadata;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn pair() -> AssetPair {
        let Ok(pair) = AssetPair::new(addr(1), addr(2)) else {
            panic!("valid pair");
        };
        pair
    }

    fn share() -> ShareToken {
        let Ok(meta) = AssetMetadata::new("TKN", "Token") else {
            panic!("valid metadata");
        };
        ShareToken::for_paired_asset(&meta)
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = PoolConfig::new(pair(), addr(9), share()) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.pool_account(), addr(9));
        assert_eq!(cfg.pair().paired(), addr(2));
        assert_eq!(cfg.share_token().symbol(), "TKN-LP");
    }

    #[test]
    fn zero_pool_account_rejected() {
        assert!(matches!(
            PoolConfig::new(pair(), Address::ZERO, share()),
            Err(ExchangeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn pool_account_cannot_be_an_asset() {
        assert!(matches!(
            PoolConfig::new(pair(), addr(1), share()),
            Err(ExchangeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn deserialized_config_revalidates() {
        let Ok(cfg) = PoolConfig::new(pair(), addr(9), share()) else {
            panic!("expected Ok");
        };
        let Ok(json) = serde_json::to_string(&cfg) else {
            panic!("serializable");
        };
        let Ok(back) = serde_json::from_str::<PoolConfig>(&json) else {
            panic!("deserializable");
        };
        assert!(back.validate().is_ok());
        assert_eq!(back, cfg);
    }
}

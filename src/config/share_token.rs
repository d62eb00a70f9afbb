//! Descriptors for the assets and the liquidity-share token.

use serde::{Deserialize, Serialize};

use crate::error::{ExchangeError, Result};

/// Suffix appended to the paired asset's symbol to form the share symbol.
pub const SHARE_SYMBOL_SUFFIX: &str = "-LP";

/// Display metadata of a fungible asset.
///
/// `symbol` is the short ticker (`"USDC"`), `name` the human-readable
/// title (`"USD Coin"`).  The two are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetMetadata {
    symbol: String,
    name: String,
}

impl AssetMetadata {
    /// Creates validated metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidConfiguration`] if the symbol is
    /// empty or contains whitespace.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let metadata = Self {
            symbol: symbol.into(),
            name: name.into(),
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Re-checks the metadata invariants.
    ///
    /// # Errors
    ///
    /// Same as [`AssetMetadata::new`].
    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() {
            return Err(ExchangeError::InvalidConfiguration("asset symbol is empty"));
        }
        if self.symbol.chars().any(char::is_whitespace) {
            return Err(ExchangeError::InvalidConfiguration(
                "asset symbol contains whitespace",
            ));
        }
        Ok(())
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The liquidity-share token of one pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareToken {
    symbol: String,
    name: String,
}

impl ShareToken {
    /// Derives the share token of the pool trading `paired`.
    ///
    /// The share symbol is built from the paired asset's **symbol**, never
    /// its display name: `USDC` becomes `USDC-LP`.
    ///
    /// # Examples
    ///
    /// ```
    /// use exchange_pair::config::{AssetMetadata, ShareToken};
    ///
    /// let usdc = AssetMetadata::new("USDC", "USD Coin").expect("valid metadata");
    /// let share = ShareToken::for_paired_asset(&usdc);
    /// assert_eq!(share.symbol(), "USDC-LP");
    /// assert_eq!(share.name(), "USD Coin Liquidity Share");
    /// ```
    #[must_use]
    pub fn for_paired_asset(paired: &AssetMetadata) -> Self {
        Self {
            symbol: format!("{}{SHARE_SYMBOL_SUFFIX}", paired.symbol()),
            name: format!("{} Liquidity Share", paired.name()),
        }
    }

    /// Share ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Share display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn symbol_comes_from_symbol_not_name() {
        let Ok(meta) = AssetMetadata::new("WETH", "Wrapped Ether") else {
            panic!("valid metadata");
        };
        let share = ShareToken::for_paired_asset(&meta);
        assert_eq!(share.symbol(), "WETH-LP");
        assert!(!share.symbol().contains("Wrapped"));
    }

    #[test]
    fn empty_symbol_rejected() {
        assert!(matches!(
            AssetMetadata::new("", "Nameless"),
            Err(ExchangeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn whitespace_symbol_rejected() {
        assert!(matches!(
            AssetMetadata::new("US DC", "USD Coin"),
            Err(ExchangeError::InvalidConfiguration(_))
        ));
    }
}

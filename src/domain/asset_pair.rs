//! The two assets traded by a pool.

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::{ExchangeError, Result};

/// Which side of the pair an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Asset A, the base asset.
    Base,
    /// Asset B, the paired asset.
    Paired,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Base => Self::Paired,
            Self::Paired => Self::Base,
        }
    }
}

/// A pair of distinct, non-zero assets: the base asset (A) and the
/// paired asset (B).
///
/// Unlike a canonically sorted pair, the order here is semantic.  Deposits
/// are quoted in the paired asset and the base asset follows the ratio, so
/// swapping the roles would change what callers bound.
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::{Address, AssetPair, Side};
///
/// let base = Address::from_bytes([1u8; 32]);
/// let paired = Address::from_bytes([2u8; 32]);
/// let pair = AssetPair::new(base, paired).expect("distinct non-zero assets");
/// assert_eq!(pair.side_of(&paired).expect("member"), Side::Paired);
/// assert!(AssetPair::new(base, base).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    base: Address,
    paired: Address,
}

impl AssetPair {
    /// Creates a validated pair.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAddress`] if either address is zero
    /// or both are the same asset.
    pub fn new(base: Address, paired: Address) -> Result<Self> {
        let pair = Self { base, paired };
        pair.validate()?;
        Ok(pair)
    }

    /// Re-checks the pair invariants, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// Same as [`AssetPair::new`].
    pub fn validate(&self) -> Result<()> {
        if self.base.is_zero() {
            return Err(ExchangeError::InvalidAddress("base asset is the zero address"));
        }
        if self.paired.is_zero() {
            return Err(ExchangeError::InvalidAddress(
                "paired asset is the zero address",
            ));
        }
        if self.base == self.paired {
            return Err(ExchangeError::InvalidAddress(
                "base and paired asset must differ",
            ));
        }
        Ok(())
    }

    /// Asset A.
    #[must_use]
    pub const fn base(&self) -> Address {
        self.base
    }

    /// Asset B.
    #[must_use]
    pub const fn paired(&self) -> Address {
        self.paired
    }

    /// Returns the asset on the given side.
    #[must_use]
    pub const fn asset(&self, side: Side) -> Address {
        match side {
            Side::Base => self.base,
            Side::Paired => self.paired,
        }
    }

    /// Returns `true` if `asset` is one of the two assets.
    #[must_use]
    pub fn contains(&self, asset: &Address) -> bool {
        self.base == *asset || self.paired == *asset
    }

    /// Locates `asset` in the pair.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::UnknownAsset`] if the asset is not in the pair.
    pub fn side_of(&self, asset: &Address) -> Result<Side> {
        if *asset == self.base {
            Ok(Side::Base)
        } else if *asset == self.paired {
            Ok(Side::Paired)
        } else {
            Err(ExchangeError::UnknownAsset)
        }
    }

    /// Resolves a trade direction.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::UnknownAsset`] if either asset is outside the pair.
    /// - [`ExchangeError::InvalidAddress`] if both name the same asset.
    pub fn direction(&self, asset_in: &Address, asset_out: &Address) -> Result<Side> {
        let side_in = self.side_of(asset_in)?;
        let side_out = self.side_of(asset_out)?;
        if side_in == side_out {
            return Err(ExchangeError::InvalidAddress(
                "input and output asset must differ",
            ));
        }
        Ok(side_in)
    }
}

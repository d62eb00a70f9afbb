//! Ledger identity shared by assets, holders, and pool accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte identity on the asset ledger.
///
/// The same type names an asset (its contract or mint), a holder of
/// assets or shares, and the pool's own custody account.  The all-zero
/// value is representable but rejected wherever a real identity is
/// required (see [`AssetPair::new`](super::AssetPair::new)).
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::Address;
///
/// let addr = Address::from_bytes([7u8; 32]);
/// assert!(!addr.is_zero());
/// assert!(Address::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

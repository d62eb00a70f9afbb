//! Events reported to the host's [`EventSink`](crate::traits::EventSink).
//!
//! Off-chain indexers decode these positionally, so the field order of each
//! struct is part of the public contract and is pinned by the golden tests
//! below.  Serialization follows declaration order.
//!
//! | Event | Fields, in order |
//! |-------|------------------|
//! | [`SwapEvent`] | swapper, input_asset*, input_amount, output_asset*, output_amount |
//! | [`LiquidityAdded`] | provider, base_amount, paired_amount, shares_minted |
//! | [`LiquidityRemoved`] | provider, base_amount, paired_amount, shares_burned |
//! | [`SharesTransferred`] | from, to, shares |
//!
//! `*` marks fields indexers may filter on.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, Shares};

/// A completed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEvent {
    /// Account that paid the input and received the output.
    pub swapper: Address,
    /// Asset paid in.  Filterable.
    pub input_asset: Address,
    /// Amount paid in.
    pub input_amount: Amount,
    /// Asset paid out.  Filterable.
    pub output_asset: Address,
    /// Amount paid out.
    pub output_amount: Amount,
}

impl SwapEvent {
    /// Field names in wire order.
    pub const FIELDS: [&'static str; 5] = [
        "swapper",
        "input_asset",
        "input_amount",
        "output_asset",
        "output_amount",
    ];

    /// Names of the filterable fields.
    pub const INDEXED: [&'static str; 2] = ["input_asset", "output_asset"];

    /// Values of the filterable fields, in [`Self::INDEXED`] order.
    #[must_use]
    pub const fn topics(&self) -> [Address; 2] {
        [self.input_asset, self.output_asset]
    }
}

/// Liquidity deposited.  The base amount is always the second field and
/// the paired amount the third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAdded {
    /// Depositor credited with the shares.
    pub provider: Address,
    /// Base asset (A) deposited.
    pub base_amount: Amount,
    /// Paired asset (B) deposited.
    pub paired_amount: Amount,
    /// Shares minted.
    pub shares_minted: Shares,
}

impl LiquidityAdded {
    /// Field names in wire order.
    pub const FIELDS: [&'static str; 4] =
        ["provider", "base_amount", "paired_amount", "shares_minted"];
}

/// Liquidity withdrawn.  Same layout as [`LiquidityAdded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    /// Holder whose shares were burned.
    pub provider: Address,
    /// Base asset (A) paid out.
    pub base_amount: Amount,
    /// Paired asset (B) paid out.
    pub paired_amount: Amount,
    /// Shares burned.
    pub shares_burned: Shares,
}

impl LiquidityRemoved {
    /// Field names in wire order.
    pub const FIELDS: [&'static str; 4] =
        ["provider", "base_amount", "paired_amount", "shares_burned"];
}

/// Shares moved between holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesTransferred {
    /// Previous holder.
    pub from: Address,
    /// New holder.
    pub to: Address,
    /// Shares moved.
    pub shares: Shares,
}

impl SharesTransferred {
    /// Field names in wire order.
    pub const FIELDS: [&'static str; 3] = ["from", "to", "shares"];
}

/// Any event a pool emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PoolEvent {
    /// See [`SwapEvent`].
    Swap(SwapEvent),
    /// See [`LiquidityAdded`].
    LiquidityAdded(LiquidityAdded),
    /// See [`LiquidityRemoved`].
    LiquidityRemoved(LiquidityRemoved),
    /// See [`SharesTransferred`].
    SharesTransferred(SharesTransferred),
}

impl PoolEvent {
    /// Event name as it appears in the `event` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Swap(_) => "Swap",
            Self::LiquidityAdded(_) => "LiquidityAdded",
            Self::LiquidityRemoved(_) => "LiquidityRemoved",
            Self::SharesTransferred(_) => "SharesTransferred",
        }
    }
}

impl From<SwapEvent> for PoolEvent {
    fn from(event: SwapEvent) -> Self {
        Self::Swap(event)
    }
}

impl From<LiquidityAdded> for PoolEvent {
    fn from(event: LiquidityAdded) -> Self {
        Self::LiquidityAdded(event)
    }
}

impl From<LiquidityRemoved> for PoolEvent {
    fn from(event: LiquidityRemoved) -> Self {
        Self::LiquidityRemoved(event)
    }
}

impl From<SharesTransferred> for PoolEvent {
    fn from(event: SharesTransferred) -> Self {
        Self::SharesTransferred(event)
    }
}

//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use exchange_pair::prelude::*;
//! ```

pub use crate::config::{AssetMetadata, PoolConfig, ShareToken};
pub use crate::domain::{
    Address, Amount, AssetPair, Deposit, DepositReceipt, Rounding, Shares, Side, SwapExactInput,
    SwapExactOutput, SwapReceipt, Timestamp, Withdraw, WithdrawReceipt,
};
pub use crate::error::{ExchangeError, Result};
pub use crate::events::PoolEvent;
pub use crate::ledger::{InMemoryLedger, LedgerError};
pub use crate::math::CheckedArithmetic;
pub use crate::pool::{ExchangePool, PoolState, ReservePair};
pub use crate::traits::{
    AssetLedger, Clock, EventLog, EventSink, ManualClock, SystemClock, TransferBatch,
};

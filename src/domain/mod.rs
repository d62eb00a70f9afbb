//! Value types used throughout the exchange core.
//!
//! Amounts, share counts, addresses, and timestamps are newtypes so that an
//! asset amount cannot be passed where a share count is expected.  Requests
//! and receipts bundle the parameters and results of the pool operations.

mod address;
mod amount;
mod asset_pair;
mod receipts;
mod requests;
mod rounding;
mod shares;
mod timestamp;

pub use address::Address;
pub use amount::Amount;
pub use asset_pair::{AssetPair, Side};
pub use receipts::{DepositReceipt, SwapReceipt, WithdrawReceipt};
pub use requests::{Deposit, SwapExactInput, SwapExactOutput, Withdraw};
pub use rounding::Rounding;
pub use shares::Shares;
pub use timestamp::Timestamp;

//! Seams to the host environment.
//!
//! A pool depends on three collaborators it does not implement:
//! [`AssetLedger`] moves assets and reports balances, [`Clock`] supplies
//! the time for deadline checks, and [`EventSink`] receives events.  All
//! three are static type parameters of the pool.

mod asset_ledger;
mod clock;
mod event_sink;

pub use asset_ledger::{AssetLedger, Transfer, TransferBatch};
pub use clock::{Clock, ManualClock, SystemClock};
pub use event_sink::{EventLog, EventSink};

//! Unified error types for the exchange core.
//!
//! Every fallible operation in the crate returns [`ExchangeError`].  Each
//! guard produces its own variant so callers can tell an expired deadline
//! from a slippage failure from a malformed request, and decide whether to
//! re-quote, extend the deadline, or loosen a bound.  Nothing is retried
//! internally.
//!
//! Failures are whole-operation aborts: a pool that returns an `Err` has
//! the same shares and ledger balances it had before the call, and its
//! cached reserves equal the ledger balances of the pool account.  The one
//! exception is [`LedgerError::PartialSettlement`], where the ledger itself
//! could not undo transfers it had already applied; the pool then adopts
//! whatever the ledger holds.

use crate::domain::Timestamp;
use crate::ledger::LedgerError;

/// Error returned by pricing, guard, swap, and liquidity operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// An amount that must be positive was zero.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// The operation executed after its caller-supplied deadline.
    #[error("transaction expired: deadline {deadline}, now {now}")]
    TransactionExpired {
        /// Deadline supplied by the caller.
        deadline: Timestamp,
        /// Clock reading at execution time.
        now: Timestamp,
    },

    /// Output fell below the caller minimum, or input rose above the
    /// caller maximum.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The requested output is not strictly below the output reserve, or a
    /// withdrawal would return nothing.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A pricing function received a zero reserve.
    #[error("invalid reserve: pricing requires two non-zero reserves")]
    InvalidReserve,

    /// A zero or duplicate address where a distinct identity is required.
    #[error("invalid address: {0}")]
    InvalidAddress(&'static str),

    /// The asset is not one of the two assets of this pool.
    #[error("asset is not part of this pool")]
    UnknownAsset,

    /// A deposit would mint fewer shares than the caller minimum.
    #[error("insufficient liquidity minted: {minted} < {minimum}")]
    InsufficientLiquidityMinted {
        /// Shares the deposit would mint.
        minted: u128,
        /// Caller minimum.
        minimum: u128,
    },

    /// A deposit needs more base asset than the caller maximum.
    #[error("excessive input required: {required} > {maximum}")]
    ExcessiveInputRequired {
        /// Base-asset amount needed to keep the current ratio.
        required: u128,
        /// Caller maximum.
        maximum: u128,
    },

    /// A holder tried to burn or move more shares than they own.
    #[error("insufficient shares: holder has {available}, requested {requested}")]
    InsufficientShares {
        /// Holder balance.
        available: u128,
        /// Requested amount.
        requested: u128,
    },

    /// Arithmetic overflow, including a wide intermediate whose quotient
    /// does not fit back into 128 bits.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A computed state transition would shrink the reserve product or
    /// break the empty-pool equivalence.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// Pool configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The ledger rejected a transfer; the operation was rolled back.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ExchangeError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_message_carries_both_times() {
        let err = ExchangeError::TransactionExpired {
            deadline: Timestamp::new(10),
            now: Timestamp::new(11),
        };
        assert_eq!(err.to_string(), "transaction expired: deadline 10, now 11");
    }

    #[test]
    fn ledger_error_converts() {
        let err: ExchangeError = LedgerError::SelfTransfer.into();
        assert!(matches!(err, ExchangeError::Ledger(LedgerError::SelfTransfer)));
    }

    #[test]
    fn variants_are_distinguishable() {
        assert_ne!(
            ExchangeError::SlippageExceeded("output below minimum"),
            ExchangeError::InsufficientLiquidity
        );
        assert_ne!(ExchangeError::ZeroAmount("x"), ExchangeError::InvalidReserve);
    }
}

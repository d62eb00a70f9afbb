//! Execution time and caller deadlines.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A point on the pool's clock, in seconds (or any monotone sequence
/// number the host uses).
///
/// Deadlines are plain timestamps: an operation whose deadline is `d`
/// may execute while `now <= d` and aborts once `now > d`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The latest representable time; a deadline that never expires.
    pub const MAX: Self = Self(u64::MAX);

    /// Wraps a raw clock reading.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw clock reading.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if `now` is past this deadline.
    #[must_use]
    pub const fn has_passed(&self, now: Self) -> bool {
        now.0 > self.0
    }

    /// Returns this timestamp shifted forward, saturating at [`Timestamp::MAX`].
    #[must_use]
    pub const fn saturating_add(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

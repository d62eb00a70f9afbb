//! Time source for deadline checks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Timestamp;

/// Supplies the current time, in seconds, to the guard layer.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in seconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch.
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Timestamp::new(secs)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hand one clone to a pool and
/// keep another to advance it.
///
/// # Examples
///
/// ```
/// use exchange_pair::domain::Timestamp;
/// use exchange_pair::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::at(Timestamp::new(100));
/// let handle = clock.clone();
/// handle.advance(5);
/// assert_eq!(clock.now(), Timestamp::new(105));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    secs: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn at(start: Timestamp) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(start.get())),
        }
    }

    /// Moves the clock to `time`.
    pub fn set(&self, time: Timestamp) {
        self.secs.store(time.get(), Ordering::SeqCst);
    }

    /// Moves the clock forward, saturating at `u64::MAX`.
    pub fn advance(&self, seconds: u64) {
        let now = self.now();
        self.set(now.saturating_add(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }
}

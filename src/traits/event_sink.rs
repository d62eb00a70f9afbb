//! Where pools report what they did.

use crate::events::PoolEvent;

/// Receives one event per successful mutating operation.
///
/// Emission happens after settlement, so a sink never sees an event for an
/// operation that was rolled back.
pub trait EventSink {
    /// Records `event`.
    fn emit(&mut self, event: PoolEvent);
}

/// Discards every event.
impl EventSink for () {
    fn emit(&mut self, _event: PoolEvent) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PoolEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&PoolEvent> {
        self.events.last()
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Shares};
    use crate::events::SharesTransferred;

    fn sample() -> PoolEvent {
        PoolEvent::SharesTransferred(SharesTransferred {
            from: Address::from_bytes([1u8; 32]),
            to: Address::from_bytes([2u8; 32]),
            shares: Shares::new(1),
        })
    }

    #[test]
    fn log_keeps_order() {
        let mut log = EventLog::new();
        log.emit(sample());
        log.emit(sample());
        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some(&sample()));
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn unit_sink_discards() {
        EventSink::emit(&mut (), sample());
    }
}

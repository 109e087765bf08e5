//! Concrete observer implementations.

use crossbeam_channel::Sender;
use tracing::{debug, trace};

use crate::observer::{UnitEvent, UnitEventKind, UnitObserver};

/// Observer that sends events through a channel (non-blocking).
pub struct ChannelObserver {
    sender: Sender<UnitEvent>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<UnitEvent>) -> Self {
        Self { sender }
    }
}

impl UnitObserver for ChannelObserver {
    fn on_event(&self, event: &UnitEvent) {
        // A full or disconnected channel drops the event; units never block on observers.
        let _ = self.sender.try_send(*event);
    }
}

/// Observer that logs unit events through `tracing`.
pub struct LoggingObserver;

impl UnitObserver for LoggingObserver {
    fn on_event(&self, event: &UnitEvent) {
        match event.kind {
            UnitEventKind::Started => {
                trace!(strategy = %event.strategy, index = event.index, "unit started");
            }
            UnitEventKind::Finished { elapsed } => {
                debug!(
                    strategy = %event.strategy,
                    index = event.index,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "unit finished"
                );
            }
        }
    }
}

/// No-op observer (discards all events).
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitObserver for NoOpObserver {
    fn on_event(&self, _event: &UnitEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use std::time::Duration;

    #[test]
    fn channel_observer_forwards() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let observer = ChannelObserver::new(tx);
        observer.on_event(&UnitEvent::started(Strategy::ThreadPerItem, 4));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.index, 4);
        assert_eq!(event.strategy, Strategy::ThreadPerItem);
    }

    #[test]
    fn channel_observer_full_does_not_block() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(tx);
        observer.on_event(&UnitEvent::started(Strategy::Sequential, 0));
        observer.on_event(&UnitEvent::started(Strategy::Sequential, 1));
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn channel_observer_disconnected() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let observer = ChannelObserver::new(tx);
        observer.on_event(&UnitEvent::started(Strategy::Sequential, 0));
    }

    #[test]
    fn logging_observer_does_not_panic() {
        let observer = LoggingObserver;
        observer.on_event(&UnitEvent::started(Strategy::ProcessPerItem, 0));
        observer.on_event(&UnitEvent::finished(
            Strategy::ProcessPerItem,
            0,
            Duration::from_millis(12),
        ));
    }

    #[test]
    fn noop_observer() {
        NoOpObserver::new().on_event(&UnitEvent::started(Strategy::CooperativeTask, 9));
    }
}

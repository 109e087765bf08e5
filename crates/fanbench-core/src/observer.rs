//! Observer pattern for per-unit lifecycle events.
//!
//! The runner emits a `Started` event when a unit is dispatched and a
//! `Finished` event once its outcome is known. Events from concurrent
//! strategies arrive in completion order, not input order.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::strategy::Strategy;

/// What happened to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitEventKind {
    /// The unit was dispatched.
    Started,
    /// The unit produced its outcome (success or failure).
    Finished {
        /// Time from dispatch to outcome.
        elapsed: Duration,
    },
}

/// Lifecycle event of the unit executing item `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitEvent {
    pub strategy: Strategy,
    pub index: usize,
    pub kind: UnitEventKind,
}

impl UnitEvent {
    #[must_use]
    pub fn started(strategy: Strategy, index: usize) -> Self {
        Self {
            strategy,
            index,
            kind: UnitEventKind::Started,
        }
    }

    #[must_use]
    pub fn finished(strategy: Strategy, index: usize, elapsed: Duration) -> Self {
        Self {
            strategy,
            index,
            kind: UnitEventKind::Finished { elapsed },
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.kind, UnitEventKind::Finished { .. })
    }
}

/// Receives unit events. Called concurrently from every unit.
pub trait UnitObserver: Send + Sync {
    fn on_event(&self, event: &UnitEvent);
}

/// Subject that fans events out to a collection of observers.
pub struct ObserverSubject {
    observers: RwLock<Vec<Arc<dyn UnitObserver>>>,
}

impl ObserverSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn UnitObserver>) {
        self.observers.write().push(observer);
    }
}

impl Default for ObserverSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitObserver for ObserverSubject {
    fn on_event(&self, event: &UnitEvent) {
        let observers = self.observers.read();
        for observer in observers.iter() {
            observer.on_event(event);
        }
    }
}

//! Result of one fan-out run.

use std::time::Duration;

use fanbench_core::strategy::Strategy;
use fanbench_core::timing::Timing;

/// Ordered results of a run plus its wall-clock timing.
#[derive(Debug, Clone)]
pub struct FanOutReport<T> {
    /// Strategy the run used.
    pub strategy: Strategy,
    /// One result per item, at the item's original index.
    pub results: Vec<T>,
    /// Start/end of the whole run.
    pub timing: Timing,
}

impl<T> FanOutReport<T> {
    #[must_use]
    pub fn new(strategy: Strategy, results: Vec<T>, timing: Timing) -> Self {
        Self {
            strategy,
            results,
            timing,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.timing.duration()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

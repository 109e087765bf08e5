//! Wall-clock timing of one run.

use std::time::{Duration, Instant};

/// Start and end instants bracketing one full fan-out run.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    started: Instant,
    finished: Instant,
}

impl Timing {
    /// Close a timing window opened at `started`.
    #[must_use]
    pub fn since(started: Instant) -> Self {
        Self {
            started,
            finished: Instant::now(),
        }
    }

    /// Elapsed wall-clock time.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.finished.saturating_duration_since(self.started)
    }

    /// Elapsed wall-clock time in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.duration().as_secs_f64()
    }
}

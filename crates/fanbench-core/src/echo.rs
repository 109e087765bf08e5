//! Identity job with an optional artificial latency.
//!
//! Stands in for a network fetch when a benchmark needs a fixed, repeatable
//! per-item delay instead of a real endpoint.

use std::time::Duration;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::job::{Job, JobError};

/// Item echoed back unchanged after `delay_ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub value: i64,
    #[serde(default)]
    pub delay_ms: u64,
}

impl Echo {
    /// An item returned immediately.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self { value, delay_ms: 0 }
    }

    /// An item returned after `delay`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn delayed(value: i64, delay: Duration) -> Self {
        Self {
            value,
            delay_ms: delay.as_millis() as u64,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Identity job: sleeps for the item's delay, then returns the item.
///
/// The blocking path parks the thread; the cooperative path suspends the
/// task on a timer so other tasks run in the meantime.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EchoJob;

impl Job for EchoJob {
    type Item = Echo;
    type Output = Echo;
    const NAME: &'static str = "echo";

    fn execute(&self, item: &Echo) -> Result<Echo, JobError> {
        if item.delay_ms > 0 {
            std::thread::sleep(item.delay());
        }
        Ok(*item)
    }

    fn execute_async<'a>(&'a self, item: &'a Echo) -> BoxFuture<'a, Result<Echo, JobError>> {
        Box::pin(async move {
            if item.delay_ms > 0 {
                tokio::time::sleep(item.delay()).await;
            }
            Ok(*item)
        })
    }
}

//! Workload configuration passed explicitly into every scenario.

use crate::constants::{DEFAULT_FETCH_COUNT, DEFAULT_INTERVALS, DEFAULT_SAMPLES, DEFAULT_URL};
use crate::integrate::Interval;
use crate::job::JobError;

/// Fixed workload parameters of the three scenarios.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// URL fetched by the HTTP scenarios.
    pub url: String,
    /// Number of copies of `url` fetched per run.
    pub fetch_count: usize,
    /// Trapezoidal samples per integration interval.
    pub samples: u64,
    /// Integration sub-intervals, one work item each.
    pub intervals: Vec<Interval>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            fetch_count: DEFAULT_FETCH_COUNT,
            samples: DEFAULT_SAMPLES,
            intervals: DEFAULT_INTERVALS.iter().copied().map(Interval::from).collect(),
        }
    }
}

impl ScenarioConfig {
    /// `fetch_count` copies of `url`.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        vec![self.url.clone(); self.fetch_count]
    }

    /// Reject configurations no job could execute.
    pub fn validate(&self) -> Result<(), JobError> {
        if self.samples < 2 {
            return Err(JobError::InvalidInput(format!(
                "samples must be at least 2, got {}",
                self.samples
            )));
        }
        if self.url.trim().is_empty() {
            return Err(JobError::InvalidInput("url must not be empty".into()));
        }
        Ok(())
    }
}

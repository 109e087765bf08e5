//! Orchestration interfaces.

use std::time::Duration;

use fanbench_core::strategy::Strategy;

use crate::report::FanOutReport;

/// Trait for presenting scenario output to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the ordered results of one run, already rendered.
    fn present_results(&self, label: &str, values: &[String]);

    /// Present the elapsed time of one run.
    fn present_timing(&self, run: &RunSummary);

    /// Present a comparison of several runs of the same scenario.
    fn present_comparison(&self, runs: &[RunSummary]);

    /// Present a non-fatal warning.
    fn present_warning(&self, message: &str);
}

/// Timing summary of one run, detached from its result type.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Scenario name.
    pub scenario: String,
    /// Strategy used.
    pub strategy: Strategy,
    /// Number of units dispatched.
    pub units: usize,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

impl RunSummary {
    #[must_use]
    pub fn from_report<T>(scenario: &str, report: &FanOutReport<T>) -> Self {
        Self {
            scenario: scenario.to_string(),
            strategy: report.strategy,
            units: report.len(),
            duration: report.duration(),
        }
    }
}

//! Scenario drivers: each pairs a job and a workload with the strategies it
//! compares, then reports results and timings.

pub mod compare;
pub mod cpu;
pub mod http;

use fanbench_core::strategy::Strategy;
use fanbench_orchestration::interfaces::{ResultPresenter, RunSummary};
use fanbench_orchestration::report::FanOutReport;
use fanbench_orchestration::FanOutRunner;

/// Everything a scenario needs besides its workload.
pub struct ScenarioContext<'a> {
    pub runner: &'a FanOutRunner,
    pub presenter: &'a dyn ResultPresenter,
    /// Print a comparison table once every strategy has run.
    pub summary: bool,
}

impl ScenarioContext<'_> {
    /// Report timing of one run and return its summary.
    pub(crate) fn record<T>(&self, scenario: &str, report: &FanOutReport<T>) -> RunSummary {
        let run = RunSummary::from_report(scenario, report);
        self.presenter.present_timing(&run);
        run
    }

    pub(crate) fn finish(&self, runs: &[RunSummary]) {
        if self.summary && runs.len() > 1 {
            self.presenter.present_comparison(runs);
        }
    }
}

/// The scenario's own strategies, or just the one chosen on the command line.
pub(crate) fn strategies(defaults: &[Strategy], chosen: Option<Strategy>) -> Vec<Strategy> {
    match chosen {
        Some(strategy) => vec![strategy],
        None => defaults.to_vec(),
    }
}

//! Numerical integration split across intervals.
//!
//! Every strategy computes the same four partial integrals; the results of
//! later strategies are checked against the first, and a disagreement is
//! reported as a warning rather than failing the run.

use anyhow::Result;
use tracing::{info, warn};

use fanbench_core::config::ScenarioConfig;
use fanbench_core::constants::AGREEMENT_TOLERANCE;
use fanbench_core::integrate::IntegrateJob;
use fanbench_core::strategy::Strategy;
use fanbench_orchestration::analysis::check_agreement;
use fanbench_orchestration::interfaces::RunSummary;

use super::{strategies, ScenarioContext};

pub const NAME: &str = "cpu";

pub const DEFAULT_STRATEGIES: [Strategy; 2] = [Strategy::ThreadPerItem, Strategy::ProcessPerItem];

/// Runs of the cpu scenario together with their partial integrals.
#[derive(Debug)]
pub struct CpuOutcome {
    pub runs: Vec<RunSummary>,
    /// Partial integrals per run, one per interval.
    pub results: Vec<Vec<f64>>,
}

pub fn run(
    ctx: &ScenarioContext<'_>,
    config: &ScenarioConfig,
    chosen: Option<Strategy>,
) -> Result<CpuOutcome> {
    config.validate()?;
    let job = IntegrateJob::new(config.samples);
    info!(samples = config.samples, intervals = config.intervals.len(), "cpu scenario");

    let mut outcome = CpuOutcome {
        runs: Vec::new(),
        results: Vec::new(),
    };
    for strategy in strategies(&DEFAULT_STRATEGIES, chosen) {
        let report = ctx.runner.run(strategy, &job, config.intervals.clone())?;
        outcome.runs.push(ctx.record(NAME, &report));

        let rendered: Vec<String> = report.results.iter().map(f64::to_string).collect();
        ctx.presenter.present_results("integrals", &rendered);

        if let Some(reference) = outcome.results.first() {
            if let Err(err) = check_agreement(reference, &report.results, AGREEMENT_TOLERANCE) {
                warn!(%strategy, %err, "strategies disagree");
                let baseline = outcome.runs[0].strategy;
                ctx.presenter
                    .present_warning(&format!("{strategy} disagrees with {baseline}: {err}"));
            }
        }
        outcome.results.push(report.results);
    }
    ctx.finish(&outcome.runs);
    Ok(outcome)
}

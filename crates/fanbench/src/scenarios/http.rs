//! Repeated GET of one URL, reporting body lengths.

use anyhow::Result;
use tracing::info;

use fanbench_core::config::ScenarioConfig;
use fanbench_core::fetch::FetchJob;
use fanbench_core::strategy::Strategy;
use fanbench_orchestration::interfaces::RunSummary;

use super::{strategies, ScenarioContext};

pub const NAME: &str = "http";

/// Cooperative tasks first, then one thread per request.
pub const DEFAULT_STRATEGIES: [Strategy; 2] = [Strategy::CooperativeTask, Strategy::ThreadPerItem];

pub fn run(
    ctx: &ScenarioContext<'_>,
    config: &ScenarioConfig,
    chosen: Option<Strategy>,
) -> Result<Vec<RunSummary>> {
    config.validate()?;
    info!(url = %config.url, count = config.fetch_count, "http scenario");

    let mut runs = Vec::new();
    for strategy in strategies(&DEFAULT_STRATEGIES, chosen) {
        let report = ctx.runner.run(strategy, &FetchJob, config.urls())?;
        let lengths: Vec<String> = report
            .results
            .iter()
            .map(|fetched| fetched.length.to_string())
            .collect();
        ctx.presenter.present_results("content lengths", &lengths);
        runs.push(ctx.record(NAME, &report));
    }
    ctx.finish(&runs);
    Ok(runs)
}

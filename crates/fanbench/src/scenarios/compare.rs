//! Repeated GET of one URL, sequential against threaded, reporting status.

use anyhow::Result;
use tracing::info;

use fanbench_core::config::ScenarioConfig;
use fanbench_core::fetch::FetchJob;
use fanbench_core::strategy::Strategy;
use fanbench_orchestration::interfaces::RunSummary;

use super::{strategies, ScenarioContext};

pub const NAME: &str = "compare";

pub const DEFAULT_STRATEGIES: [Strategy; 2] = [Strategy::Sequential, Strategy::ThreadPerItem];

pub fn run(
    ctx: &ScenarioContext<'_>,
    config: &ScenarioConfig,
    chosen: Option<Strategy>,
) -> Result<Vec<RunSummary>> {
    config.validate()?;
    info!(url = %config.url, count = config.fetch_count, "compare scenario");

    let urls = config.urls();
    let mut runs = Vec::new();
    for strategy in strategies(&DEFAULT_STRATEGIES, chosen) {
        let report = ctx.runner.run(strategy, &FetchJob, urls.clone())?;
        let lines: Vec<String> = urls
            .iter()
            .zip(&report.results)
            .map(|(url, fetched)| format!("{url}: {}", fetched.status))
            .collect();
        ctx.presenter.present_results(strategy.label(), &lines);
        runs.push(ctx.record(NAME, &report));
    }
    ctx.finish(&runs);
    Ok(runs)
}

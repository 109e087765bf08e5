//! Application entry point and dispatch.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};

use fanbench_cli::presenter::CliResultPresenter;
use fanbench_cli::ui::print_header;
use fanbench_core::config::ScenarioConfig;
use fanbench_core::observer::ObserverSubject;
use fanbench_core::observers::LoggingObserver;
use fanbench_orchestration::registry::JobRegistry;
use fanbench_orchestration::worker::{run_worker, WorkerCommand};
use fanbench_orchestration::FanOutRunner;

use crate::config::{AppConfig, ScenarioCommand};
use crate::scenarios::{compare, cpu, http, ScenarioContext};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    match config.command() {
        ScenarioCommand::Worker => run_worker_mode(),
        ScenarioCommand::Http(args) => with_context(config, |ctx| {
            section(config, "HTTP fan-out");
            http::run(ctx, &args.scenario_config(), args.strategy)?;
            Ok(())
        }),
        ScenarioCommand::Cpu(args) => with_context(config, |ctx| {
            section(config, "CPU fan-out");
            cpu::run(ctx, &args.scenario_config(), args.strategy)?;
            Ok(())
        }),
        ScenarioCommand::Compare(args) => with_context(config, |ctx| {
            section(config, "Sequential vs threads");
            compare::run(ctx, &args.scenario_config(), args.strategy)?;
            Ok(())
        }),
        ScenarioCommand::All => with_context(config, |ctx| {
            let scenario = ScenarioConfig::default();
            section(config, "HTTP fan-out");
            http::run(ctx, &scenario, None)?;
            section(config, "CPU fan-out");
            cpu::run(ctx, &scenario, None)?;
            section(config, "Sequential vs threads");
            compare::run(ctx, &scenario, None)?;
            Ok(())
        }),
    }
}

fn run_worker_mode() -> Result<()> {
    let registry = JobRegistry::with_builtin_jobs();
    run_worker(&registry, io::stdin().lock(), io::stdout().lock())
        .context("worker failed")?;
    Ok(())
}

fn with_context<F>(config: &AppConfig, scenario: F) -> Result<()>
where
    F: FnOnce(&ScenarioContext<'_>) -> Result<()>,
{
    let runner = build_runner()?;
    let presenter = CliResultPresenter::new(config.quiet);
    scenario(&ScenarioContext {
        runner: &runner,
        presenter: &presenter,
        summary: config.summary,
    })
}

fn section(config: &AppConfig, title: &str) {
    if !config.quiet {
        print_header(title);
    }
}

/// Runner whose process units re-invoke this executable, logging every unit.
fn build_runner() -> Result<FanOutRunner> {
    let worker = WorkerCommand::current_exe().context("cannot locate own executable")?;
    let observers = ObserverSubject::new();
    observers.register(Arc::new(LoggingObserver));
    Ok(FanOutRunner::new()
        .with_worker(worker)
        .with_observer(Arc::new(observers)))
}

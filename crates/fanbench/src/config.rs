//! Application configuration from CLI flags.

use clap::{Args, Parser, Subcommand};

use fanbench_core::config::ScenarioConfig;
use fanbench_core::constants::{DEFAULT_FETCH_COUNT, DEFAULT_SAMPLES, DEFAULT_URL};
use fanbench_core::strategy::Strategy;

/// fanbench: time the same workload under different concurrency strategies.
///
/// Without a subcommand every scenario runs with its default workload.
#[derive(Parser, Debug)]
#[command(name = "fanbench", version, about)]
pub struct AppConfig {
    #[command(subcommand)]
    pub command: Option<ScenarioCommand>,

    /// Print a comparison table after each scenario.
    #[arg(long, global = true)]
    pub summary: bool,

    /// Quiet mode (only print results).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScenarioCommand {
    /// Fetch a URL repeatedly with cooperative tasks, then one thread per request.
    Http(HttpArgs),
    /// Integrate sin(x)*exp(-x) over four intervals with threads, then processes.
    Cpu(CpuArgs),
    /// Fetch a URL repeatedly on one thread, then one thread per request.
    Compare(HttpArgs),
    /// Run http, cpu, and compare with default workloads.
    All,
    /// Execute one unit of work read from stdin (used by process-per-item).
    #[command(hide = true)]
    Worker,
}

#[derive(Args, Debug, Clone)]
pub struct HttpArgs {
    /// URL to fetch.
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Number of requests.
    #[arg(short = 'n', long, default_value_t = DEFAULT_FETCH_COUNT)]
    pub count: usize,

    /// Run a single strategy instead of the scenario's pair.
    #[arg(long)]
    pub strategy: Option<Strategy>,
}

#[derive(Args, Debug, Clone)]
pub struct CpuArgs {
    /// Trapezoidal samples per interval.
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: u64,

    /// Run a single strategy instead of the scenario's pair.
    #[arg(long)]
    pub strategy: Option<Strategy>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The subcommand to run; `all` when none was given.
    #[must_use]
    pub fn command(&self) -> ScenarioCommand {
        self.command.clone().unwrap_or(ScenarioCommand::All)
    }
}

impl HttpArgs {
    #[must_use]
    pub fn scenario_config(&self) -> ScenarioConfig {
        ScenarioConfig {
            url: self.url.clone(),
            fetch_count: self.count,
            ..ScenarioConfig::default()
        }
    }
}

impl CpuArgs {
    #[must_use]
    pub fn scenario_config(&self) -> ScenarioConfig {
        ScenarioConfig {
            samples: self.samples,
            ..ScenarioConfig::default()
        }
    }
}

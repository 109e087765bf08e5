//! CLI result presenter.

use fanbench_orchestration::analysis::relative_speeds;
use fanbench_orchestration::interfaces::{ResultPresenter, RunSummary};

use crate::output::{format_duration, format_list, format_seconds, format_speedup};
use crate::ui::print_warning;

/// Prints scenario output to stdout, warnings to stderr.
pub struct CliResultPresenter {
    quiet: bool,
}

impl CliResultPresenter {
    /// In quiet mode only results are printed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ResultPresenter for CliResultPresenter {
    fn present_results(&self, label: &str, values: &[String]) {
        if self.quiet {
            println!("{}", format_list(values));
        } else {
            println!("{label}: {}", format_list(values));
        }
    }

    fn present_timing(&self, run: &RunSummary) {
        if self.quiet {
            return;
        }
        println!(
            "{} ({} units) took {}",
            run.strategy.label(),
            run.units,
            format_seconds(run.duration)
        );
    }

    fn present_comparison(&self, runs: &[RunSummary]) {
        if self.quiet || runs.is_empty() {
            return;
        }

        println!("\nComparison ({}):", runs[0].scenario);
        println!("{:-<60}", "");
        for (run, speed) in runs.iter().zip(relative_speeds(runs)) {
            println!(
                "  {:<20} {:>12} {:>8}",
                run.strategy.label(),
                format_duration(run.duration),
                format_speedup(speed),
            );
        }
    }

    fn present_warning(&self, message: &str) {
        print_warning(message);
    }
}

//! Concurrency strategy selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the runner schedules one unit of work per item.
///
/// The strategy decides scheduling only, never what a unit computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One item at a time on the calling thread.
    Sequential,
    /// One OS thread per item, all joined before returning.
    ThreadPerItem,
    /// One suspendable task per item on a single-threaded scheduler.
    CooperativeTask,
    /// One OS process per item, results sent back over a pipe.
    ProcessPerItem,
}

impl Strategy {
    /// Every strategy, in increasing order of per-unit setup cost.
    pub const ALL: [Strategy; 4] = [
        Strategy::Sequential,
        Strategy::CooperativeTask,
        Strategy::ThreadPerItem,
        Strategy::ProcessPerItem,
    ];

    /// Short name accepted on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::ThreadPerItem => "threads",
            Strategy::CooperativeTask => "cooperative",
            Strategy::ProcessPerItem => "processes",
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Sequential => "single thread",
            Strategy::ThreadPerItem => "thread per item",
            Strategy::CooperativeTask => "cooperative tasks",
            Strategy::ProcessPerItem => "process per item",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected sequential, threads, cooperative, or processes)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Strategy::Sequential),
            "threads" | "thread" => Ok(Strategy::ThreadPerItem),
            "cooperative" | "coop" | "async" => Ok(Strategy::CooperativeTask),
            "processes" | "process" => Ok(Strategy::ProcessPerItem),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

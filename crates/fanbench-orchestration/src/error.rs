//! Fan-out errors.

use std::io;

use fanbench_core::job::JobError;

/// Why a fan-out run did not produce a full result set.
///
/// Every variant aborts the whole run; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum FanOutError {
    /// The job failed on one item.
    #[error("item {index} failed: {source}")]
    Job {
        index: usize,
        #[source]
        source: JobError,
    },

    /// A unit panicked instead of returning.
    #[error("unit for item {index} panicked")]
    Panicked { index: usize },

    /// An execution context (thread or process) could not be created or joined.
    #[error("could not start unit for item {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    /// A worker process exited unsuccessfully.
    #[error("worker for item {index} exited with {}: {stderr}", exit_description(.code))]
    Worker {
        index: usize,
        code: Option<i32>,
        stderr: String,
    },

    /// A worker process wrote output that is not a valid result.
    #[error("worker for item {index} returned malformed output: {source}")]
    Protocol {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The job or an item could not be encoded for a worker process.
    #[error("could not encode work for a worker: {0}")]
    Encode(#[source] serde_json::Error),

    /// The worker executable could not be located.
    #[error("could not locate worker executable: {0}")]
    WorkerPath(#[source] io::Error),

    /// The cooperative scheduler could not be built.
    #[error("could not start cooperative scheduler: {0}")]
    Runtime(#[source] io::Error),

    /// A result slot was never written. Indicates a runner bug.
    #[error("result slot {index} was never filled")]
    Unfilled { index: usize },
}

impl FanOutError {
    /// Index of the item the error belongs to, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            FanOutError::Job { index, .. }
            | FanOutError::Panicked { index }
            | FanOutError::Spawn { index, .. }
            | FanOutError::Worker { index, .. }
            | FanOutError::Protocol { index, .. }
            | FanOutError::Unfilled { index } => Some(*index),
            FanOutError::Encode(_) | FanOutError::WorkerPath(_) | FanOutError::Runtime(_) => None,
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

//! Process-per-item worker protocol.
//!
//! The parent writes one JSON envelope `{job, payload, item}` to the child's
//! stdin and closes it. The child executes the job and writes one JSON
//! value to stdout, exiting non-zero with a message on stderr on failure.
//! Stdout carries nothing but the result.

use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use fanbench_core::constants::WORKER_SUBCOMMAND;
use fanbench_core::job::JobError;

use crate::registry::JobRegistry;

/// Program and arguments that start one worker process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl WorkerCommand {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The running executable, re-invoked with the worker subcommand.
    pub fn current_exe() -> io::Result<Self> {
        Ok(Self::new(env::current_exe()?).arg(WORKER_SUBCOMMAND))
    }

    pub(crate) fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Envelope written by the parent.
#[derive(Serialize)]
pub(crate) struct Envelope<'a, I> {
    pub job: &'a str,
    pub payload: &'a Value,
    pub item: &'a I,
}

/// Envelope as read by the worker.
#[derive(Deserialize)]
struct IncomingEnvelope {
    job: String,
    #[serde(default)]
    payload: Value,
    item: Value,
}

/// Failure inside a worker process.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("worker i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Job(#[from] JobError),
}

/// Serve exactly one envelope from `input`, writing the result to `output`.
pub fn run_worker<R: Read, W: Write>(
    registry: &JobRegistry,
    mut input: R,
    mut output: W,
) -> Result<(), WorkerError> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;
    let envelope: IncomingEnvelope = serde_json::from_slice(&raw).map_err(JobError::from)?;
    debug!(job = %envelope.job, pid = std::process::id(), "worker executing");

    let value = registry.execute(&envelope.job, envelope.payload, envelope.item)?;
    serde_json::to_writer(&mut output, &value).map_err(JobError::from)?;
    output.flush()?;
    Ok(())
}

//! Job registry used by worker processes.
//!
//! A worker receives a job name plus JSON-encoded job and item, and needs a
//! concrete `Job` type to decode them into. The registry maps each name to
//! a monomorphized handler.

use std::collections::HashMap;

use serde_json::Value;

use fanbench_core::echo::EchoJob;
use fanbench_core::fetch::FetchJob;
use fanbench_core::integrate::IntegrateJob;
use fanbench_core::job::{Job, JobError};

type Handler = fn(Value, Value) -> Result<Value, JobError>;

/// Name-to-handler table for jobs a worker can execute.
#[derive(Clone, Default)]
pub struct JobRegistry {
    handlers: HashMap<&'static str, Handler>,
}

impl JobRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every job shipped in `fanbench-core`.
    #[must_use]
    pub fn with_builtin_jobs() -> Self {
        let mut registry = Self::new();
        registry.register::<IntegrateJob>();
        registry.register::<FetchJob>();
        registry.register::<EchoJob>();
        registry
    }

    /// Register `J` under [`Job::NAME`], replacing any previous handler.
    pub fn register<J: Job>(&mut self) {
        self.handlers.insert(J::NAME, dispatch::<J>);
    }

    /// Decode `payload` and `item` for job `name`, execute, encode the output.
    pub fn execute(&self, name: &str, payload: Value, item: Value) -> Result<Value, JobError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| JobError::UnknownJob(name.to_string()))?;
        handler(payload, item)
    }
}

fn dispatch<J: Job>(payload: Value, item: Value) -> Result<Value, JobError> {
    let job: J = serde_json::from_value(payload)?;
    let item: J::Item = serde_json::from_value(item)?;
    let output = job.execute(&item)?;
    Ok(serde_json::to_value(output)?)
}

//! The `Job` trait and its error type.
//!
//! A `Job` is the pure `execute(item) -> value` function the fan-out runner
//! dispatches once per work item. Jobs are serializable so that the
//! process-per-item strategy can ship them to an isolated worker process.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error raised by a job while executing a single work item.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The HTTP collaborator failed (connection refused, DNS, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Job input rejected before any work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A job, item, or output could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A worker was asked to run a job name it does not know.
    #[error("unknown job: {0}")]
    UnknownJob(String),
}

/// A unit of work the runner can execute under any strategy.
pub trait Job: Send + Sync + Serialize + DeserializeOwned {
    /// Input value of one work item.
    type Item: Send + Sync + Serialize + DeserializeOwned;
    /// Value produced for one work item.
    type Output: Send + Serialize + DeserializeOwned;

    /// Stable name used to resolve the job inside a worker process.
    const NAME: &'static str;

    /// Execute one item, blocking the calling thread.
    fn execute(&self, item: &Self::Item) -> Result<Self::Output, JobError>;

    /// Execute one item as a suspendable task.
    ///
    /// The default runs [`Job::execute`] to completion without yielding,
    /// which is the right behaviour for CPU-bound jobs. I/O jobs override
    /// it so the task suspends at its await points.
    fn execute_async<'a>(
        &'a self,
        item: &'a Self::Item,
    ) -> BoxFuture<'a, Result<Self::Output, JobError>> {
        Box::pin(async move { self.execute(item) })
    }
}

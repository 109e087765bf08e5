//! # fanbench-orchestration
//!
//! Fan-out/fan-in execution under a chosen strategy, the process worker
//! protocol, and analysis of competing runs.

pub mod analysis;
pub mod error;
pub mod interfaces;
pub mod registry;
pub mod report;
pub mod runner;
pub mod slots;
pub mod worker;

pub use analysis::{check_agreement, relative_speeds, AgreementError};
pub use error::FanOutError;
pub use interfaces::{ResultPresenter, RunSummary};
pub use registry::JobRegistry;
pub use report::FanOutReport;
pub use runner::FanOutRunner;
pub use worker::{run_worker, WorkerCommand};

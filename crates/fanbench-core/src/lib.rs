//! # fanbench-core
//!
//! Building blocks shared by every fanbench scenario: work items, the
//! concurrency strategy selector, the `Job` trait and its built-in
//! implementations (HTTP fetch, trapezoidal integration, echo), timing,
//! and per-unit observers.

pub mod config;
pub mod constants;
pub mod echo;
pub mod fetch;
pub mod integrate;
pub mod item;
pub mod job;
pub mod observer;
pub mod observers;
pub mod strategy;
pub mod timing;

// Re-exports
pub use config::ScenarioConfig;
pub use constants::{exit_codes, DEFAULT_FETCH_COUNT, DEFAULT_SAMPLES, DEFAULT_URL};
pub use echo::{Echo, EchoJob};
pub use fetch::{FetchJob, Fetched};
pub use integrate::{damped_sine, trapezoid, IntegrateJob, Interval};
pub use item::WorkItem;
pub use job::{Job, JobError};
pub use observer::{ObserverSubject, UnitEvent, UnitEventKind, UnitObserver};
pub use strategy::Strategy;
pub use timing::Timing;

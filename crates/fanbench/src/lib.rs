//! fanbench library: application logic behind the `fanbench` binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod logging;
pub mod scenarios;

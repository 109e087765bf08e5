//! # fanbench-cli
//!
//! CLI output formatting and result presentation.

pub mod output;
pub mod presenter;
pub mod ui;

pub use presenter::CliResultPresenter;

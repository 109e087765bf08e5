//! Workspace-level integration tests for fanbench.
//!
//! The tests under `tests/` exercise the core jobs and the fan-out runner
//! together, across every in-process strategy.

//! Default workload constants and exit codes.

/// URL fetched by the HTTP scenarios.
pub const DEFAULT_URL: &str = "http://www.example.com";

/// Number of copies of [`DEFAULT_URL`] fetched per HTTP run.
pub const DEFAULT_FETCH_COUNT: usize = 10;

/// Trapezoidal sample count per integration interval.
pub const DEFAULT_SAMPLES: u64 = 100_000_000;

/// Integration sub-intervals `(start, end)` of the CPU scenario.
pub const DEFAULT_INTERVALS: [(f64, f64); 4] = [(0.0, 5.0), (5.0, 10.0), (10.0, 15.0), (15.0, 20.0)];

/// Relative tolerance used when cross-checking results of two parallel runs.
pub const AGREEMENT_TOLERANCE: f64 = 1e-9;

/// Subcommand used to re-invoke the binary as a process-per-item worker.
pub const WORKER_SUBCOMMAND: &str = "worker";

/// Process exit codes.
pub mod exit_codes {
    /// Generic error (network failure, job failure, panicked unit).
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration (e.g. fewer than two samples).
    pub const ERROR_CONFIG: i32 = 4;
    /// A worker process exited unsuccessfully or broke the protocol.
    pub const ERROR_WORKER: i32 = 5;
}

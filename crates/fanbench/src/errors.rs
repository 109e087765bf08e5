//! Error handling and exit codes.

use fanbench_core::constants::exit_codes;
use fanbench_core::job::JobError;
use fanbench_orchestration::worker::WorkerError;
use fanbench_orchestration::FanOutError;

/// Map an application error to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<FanOutError>() {
        return fan_out_exit_code(err);
    }
    if err.downcast_ref::<WorkerError>().is_some() {
        return exit_codes::ERROR_WORKER;
    }
    match err.downcast_ref::<JobError>() {
        Some(JobError::InvalidInput(_)) => exit_codes::ERROR_CONFIG,
        _ => exit_codes::ERROR_GENERIC,
    }
}

fn fan_out_exit_code(err: &FanOutError) -> i32 {
    match err {
        FanOutError::Worker { .. }
        | FanOutError::Protocol { .. }
        | FanOutError::WorkerPath(_) => exit_codes::ERROR_WORKER,
        _ => exit_codes::ERROR_GENERIC,
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;

use fanbench_orchestration::{run_worker, JobRegistry};

fuzz_target!(|data: &[u8]| {
    // No jobs registered: built-in jobs sleep or loop for as long as the
    // input asks, so only envelope decoding is exercised here.
    let registry = JobRegistry::new();
    let mut output = Vec::new();
    let result = run_worker(&registry, data, &mut output);
    assert!(result.is_err());
    assert!(output.is_empty());
});

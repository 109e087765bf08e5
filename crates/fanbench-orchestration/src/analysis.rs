//! Analysis of competing runs: speed-ups and numeric agreement.

use crate::interfaces::RunSummary;

/// Why two runs of the same numeric workload disagree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgreementError {
    #[error("runs produced {expected} and {actual} results")]
    Length { expected: usize, actual: usize },

    #[error("result {index} differs: {expected} vs {actual}")]
    Value {
        index: usize,
        expected: f64,
        actual: f64,
    },
}

/// Check that `candidate` matches `reference` element-wise within a
/// relative tolerance. Parallelism must never change a numeric result.
pub fn check_agreement(
    reference: &[f64],
    candidate: &[f64],
    relative_tolerance: f64,
) -> Result<(), AgreementError> {
    if reference.len() != candidate.len() {
        return Err(AgreementError::Length {
            expected: reference.len(),
            actual: candidate.len(),
        });
    }
    for (index, (&expected, &actual)) in reference.iter().zip(candidate).enumerate() {
        let scale = expected.abs().max(actual.abs()).max(f64::MIN_POSITIVE);
        if (expected - actual).abs() / scale > relative_tolerance {
            return Err(AgreementError::Value {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Speed of each run relative to the first one (`> 1.0` is faster).
#[must_use]
pub fn relative_speeds(runs: &[RunSummary]) -> Vec<f64> {
    let Some(baseline) = runs.first() else {
        return Vec::new();
    };
    let base = baseline.duration.as_secs_f64();
    runs.iter()
        .map(|run| {
            let secs = run.duration.as_secs_f64();
            if secs > 0.0 {
                base / secs
            } else {
                f64::INFINITY
            }
        })
        .collect()
}

//! Trapezoidal-rule integration of the damped sine `sin(x)·e^(-x)`.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SAMPLES;
use crate::job::{Job, JobError};

/// A closed integration interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl From<(f64, f64)> for Interval {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

/// The fixed integrand of the CPU scenario.
#[inline]
#[must_use]
pub fn damped_sine(x: f64) -> f64 {
    x.sin() * (-x).exp()
}

/// Integrate `f` over `[a, b]` with the trapezoidal rule on `samples`
/// evenly spaced points, both endpoints included.
///
/// Deterministic for identical inputs. Fewer than two samples leave no
/// trapezoid to sum and are rejected.
///
/// # Example
/// ```
/// use fanbench_core::integrate::trapezoid;
///
/// let area = trapezoid(|x| 2.0 * x, 0.0, 3.0, 4).unwrap();
/// assert!((area - 9.0).abs() < 1e-12);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn trapezoid<F>(f: F, a: f64, b: f64, samples: u64) -> Result<f64, JobError>
where
    F: Fn(f64) -> f64,
{
    if samples < 2 {
        return Err(JobError::InvalidInput(format!(
            "trapezoidal rule needs at least 2 samples, got {samples}"
        )));
    }

    let dx = (b - a) / (samples - 1) as f64;
    let mut interior = 0.0;
    for i in 1..samples - 1 {
        interior += f(a + i as f64 * dx);
    }
    Ok(dx * (interior + 0.5 * (f(a) + f(b))))
}

/// Job integrating [`damped_sine`] over one [`Interval`] per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrateJob {
    /// Sample count per interval.
    pub samples: u64,
}

impl IntegrateJob {
    #[must_use]
    pub fn new(samples: u64) -> Self {
        Self { samples }
    }
}

impl Default for IntegrateJob {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}

impl Job for IntegrateJob {
    type Item = Interval;
    type Output = f64;
    const NAME: &'static str = "integrate";

    fn execute(&self, item: &Interval) -> Result<f64, JobError> {
        trapezoid(damped_sine, item.start, item.end, self.samples)
    }
}

//! CLI output formatting.

use std::fmt::Display;
use std::time::Duration;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Elapsed time as plain seconds, the unit every scenario reports in.
#[must_use]
pub fn format_seconds(d: Duration) -> String {
    format!("{:.4} seconds", d.as_secs_f64())
}

/// Render values as a bracketed, comma-separated list.
#[must_use]
pub fn format_list<T: Display>(values: &[T]) -> String {
    let inner: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", inner.join(", "))
}

/// Speed-up factor, e.g. `3.97x`.
#[must_use]
pub fn format_speedup(factor: f64) -> String {
    if factor.is_finite() {
        format!("{factor:.2}x")
    } else {
        "n/a".to_string()
    }
}

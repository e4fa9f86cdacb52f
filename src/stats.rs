//! Shared statistics helpers
//!
//! Small numeric primitives used by the trend and stress modules: mean,
//! ordinary least-squares slope, pairwise percent changes, and the 1-decimal
//! rounding applied to reported figures.

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Ordinary least-squares slope of `values` against their 0-based index.
///
/// Samples are treated as equally spaced; the x-axis is position in the
/// window, not elapsed days. Returns 0 when the fit is degenerate (fewer
/// than 2 points).
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n as f64 - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean) * (x - x_mean);
    }

    if denominator == 0.0 {
        return 0.0;
    }

    numerator / denominator
}

/// Absolute percent change between each consecutive pair of values.
///
/// A pair whose baseline value is zero has no defined percent change and is
/// excluded from the result.
pub fn abs_percent_changes(values: &[f64]) -> Vec<f64> {
    let mut changes = Vec::with_capacity(values.len().saturating_sub(1));
    for pair in values.windows(2) {
        if pair[0] == 0.0 {
            continue;
        }
        changes.push(((pair[1] - pair[0]) / pair[0] * 100.0).abs());
    }
    changes
}

/// Round to 1 decimal place, matching the precision of reported figures.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

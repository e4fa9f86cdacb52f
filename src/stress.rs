//! Stress pattern detection
//!
//! Three independent heuristics over the chronologically sorted series:
//! a decreasing regression slope over the most recent readings, high
//! variability between consecutive readings, and consistently low absolute
//! values. The boolean aggregate and the descriptive level are separate
//! entry points consuming the same detectors.

use crate::series::sort_chronological;
use crate::stats::{abs_percent_changes, linear_slope, mean};
use crate::types::{HrvSample, StressAssessment, StressLevel};

/// Minimum samples required before any pattern detection runs.
pub const MIN_SAMPLES: usize = 3;

/// Number of most recent samples fed to the regression slope.
pub const REGRESSION_WINDOW: usize = 5;

/// Slope below which the series counts as a decreasing trend
/// (milliseconds per sample step, strict comparison).
pub const DECREASING_SLOPE_MS: f64 = -2.0;

/// Average pairwise percent change above which variability is high.
pub const VARIABILITY_THRESHOLD_PCT: f64 = 25.0;

/// Absolute HRV floor; readings below it count as low.
pub const LOW_VALUE_THRESHOLD_MS: f64 = 30.0;

/// Number of most recent samples examined for low values.
pub const LOW_VALUE_WINDOW: usize = 3;

/// How many of the recent window must be low for the verdict.
pub const LOW_VALUE_COUNT: usize = 2;

// Full-series mean thresholds for the fallback levels
const LOW_STRESS_MEAN_MS: f64 = 50.0;
const MODERATE_STRESS_MEAN_MS: f64 = 30.0;

/// Detect a decreasing trend across the most recent readings.
///
/// Fits an ordinary least-squares line through the last [`REGRESSION_WINDOW`]
/// samples, index against value; requires at least [`MIN_SAMPLES`] of them.
pub fn detect_decreasing_trend(samples: &[HrvSample]) -> bool {
    decreasing_trend(&sorted_values(samples))
}

/// Detect unusually high variability between consecutive readings.
pub fn detect_high_variability(samples: &[HrvSample]) -> bool {
    high_variability(&sorted_values(samples))
}

/// Detect consistently low values across the most recent readings.
pub fn detect_consistently_low(samples: &[HrvSample]) -> bool {
    consistently_low(&sorted_values(samples))
}

/// Boolean stress verdict: true when any of the three patterns is present.
///
/// Fewer than [`MIN_SAMPLES`] samples is a defined edge case and returns
/// false.
pub fn is_stressed(samples: &[HrvSample]) -> bool {
    let values = sorted_values(samples);
    if values.len() < MIN_SAMPLES {
        return false;
    }
    decreasing_trend(&values) || high_variability(&values) || consistently_low(&values)
}

/// Descriptive stress level for the series.
pub fn stress_level(samples: &[HrvSample]) -> StressLevel {
    assess_stress(samples).level
}

/// Composite stress verdict: boolean aggregate plus descriptive level.
///
/// Level priority: decreasing trend, then high variability, then
/// consistently low values. When no pattern fires, the level falls back to
/// thresholds on the full-series mean.
pub fn assess_stress(samples: &[HrvSample]) -> StressAssessment {
    let values = sorted_values(samples);

    if values.len() < MIN_SAMPLES {
        return StressAssessment {
            is_stressed: false,
            level: StressLevel::InsufficientData,
        };
    }

    let decreasing = decreasing_trend(&values);
    let fluctuating = high_variability(&values);
    let low = consistently_low(&values);

    let level = if decreasing {
        StressLevel::IncreasingStress
    } else if fluctuating {
        StressLevel::Fluctuating
    } else if low {
        StressLevel::ConsistentlyHigh
    } else {
        let average = mean(&values).unwrap_or(0.0);
        if average > LOW_STRESS_MEAN_MS {
            StressLevel::Low
        } else if average > MODERATE_STRESS_MEAN_MS {
            StressLevel::Moderate
        } else {
            StressLevel::High
        }
    };

    StressAssessment {
        is_stressed: decreasing || fluctuating || low,
        level,
    }
}

fn sorted_values(samples: &[HrvSample]) -> Vec<f64> {
    sort_chronological(samples)
        .iter()
        .map(|s| s.value_ms)
        .collect()
}

fn decreasing_trend(values: &[f64]) -> bool {
    let window = &values[values.len().saturating_sub(REGRESSION_WINDOW)..];
    if window.len() < MIN_SAMPLES {
        return false;
    }
    linear_slope(window) < DECREASING_SLOPE_MS
}

fn high_variability(values: &[f64]) -> bool {
    if values.len() < MIN_SAMPLES {
        return false;
    }
    // Zero-baseline pairs carry no defined percent change and are skipped
    let changes = abs_percent_changes(values);
    match mean(&changes) {
        Some(average) => average > VARIABILITY_THRESHOLD_PCT,
        None => false,
    }
}

fn consistently_low(values: &[f64]) -> bool {
    if values.len() < MIN_SAMPLES {
        return false;
    }
    let recent = &values[values.len() - LOW_VALUE_WINDOW..];
    let low_count = recent
        .iter()
        .filter(|&&v| v < LOW_VALUE_THRESHOLD_MS)
        .count();
    low_count >= LOW_VALUE_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn series(values: &[f64]) -> Vec<HrvSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                HrvSample::new(
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(i as u64),
                    v,
                )
            })
            .collect()
    }

    #[test]
    fn test_decreasing_trend_boundary_is_exclusive() {
        // Strictly decreasing by 2 per step fits slope exactly -2; the
        // verdict requires the slope to be strictly below -2, so this
        // boundary series does not fire.
        assert!(!detect_decreasing_trend(&series(&[
            60.0, 58.0, 56.0, 54.0, 52.0
        ])));

        // Slightly steeper than -2 per step does
        assert!(detect_decreasing_trend(&series(&[
            60.0, 57.5, 55.0, 52.5, 50.0
        ])));
    }

    #[test]
    fn test_decreasing_trend_uses_recent_window() {
        // Flat for ten days, then a steep drop in the last five
        let mut values = vec![60.0; 10];
        values.extend([60.0, 55.0, 50.0, 45.0, 40.0]);
        assert!(detect_decreasing_trend(&series(&values)));
    }

    #[test]
    fn test_decreasing_trend_requires_three_samples() {
        assert!(!detect_decreasing_trend(&series(&[60.0, 40.0])));
    }

    #[test]
    fn test_high_variability() {
        // Changes of 50% and ~4% average well above the 25% threshold
        assert!(detect_high_variability(&series(&[50.0, 25.0, 26.0])));

        // Equal values have 0% average change
        assert!(!detect_high_variability(&series(&[40.0, 40.0, 40.0])));

        assert!(!detect_high_variability(&series(&[50.0, 25.0])));
    }

    #[test]
    fn test_high_variability_skips_zero_baseline() {
        // The (0 -> 10) pair is excluded; the remaining (10 -> 10) pair
        // averages 0%
        assert!(!detect_high_variability(&series(&[0.0, 10.0, 10.0])));
    }

    #[test]
    fn test_consistently_low() {
        // All of the last 3 below 30
        assert!(detect_consistently_low(&series(&[45.0, 28.0, 29.0, 25.0])));

        // Exactly 2 of the last 3
        assert!(detect_consistently_low(&series(&[45.0, 28.0, 35.0, 25.0])));

        // Only 1 of the last 3
        assert!(!detect_consistently_low(&series(&[45.0, 40.0, 35.0, 25.0])));

        assert!(!detect_consistently_low(&series(&[25.0, 25.0])));
    }

    #[test]
    fn test_insufficient_data() {
        let assessment = assess_stress(&series(&[40.0, 42.0]));
        assert!(!assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::InsufficientData);
        assert!(!is_stressed(&series(&[40.0, 42.0])));
    }

    #[test]
    fn test_level_priority_decreasing_first() {
        // Steep decline that is also low-valued: decreasing trend wins
        let samples = series(&[50.0, 40.0, 28.0, 20.0, 12.0]);
        assert!(detect_decreasing_trend(&samples));
        assert!(detect_consistently_low(&samples));

        let assessment = assess_stress(&samples);
        assert!(assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::IncreasingStress);
    }

    #[test]
    fn test_level_fluctuating() {
        let samples = series(&[50.0, 25.0, 52.0, 26.0, 50.0]);
        let assessment = assess_stress(&samples);
        assert!(assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::Fluctuating);
    }

    #[test]
    fn test_level_consistently_high() {
        // Low values without a steep slope or high variability
        let samples = series(&[29.0, 28.0, 29.0, 28.0]);
        assert!(!detect_decreasing_trend(&samples));
        assert!(!detect_high_variability(&samples));

        let assessment = assess_stress(&samples);
        assert!(assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::ConsistentlyHigh);
    }

    #[test]
    fn test_fallback_levels_from_mean() {
        // Calm series, mean above 50
        let assessment = assess_stress(&series(&[55.0, 56.0, 57.0, 58.0]));
        assert!(!assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::Low);

        // Mean between 30 and 50
        let assessment = assess_stress(&series(&[40.0, 41.0, 42.0, 43.0]));
        assert!(!assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::Moderate);

        // Mean at or below 30 without any pattern firing: recent readings
        // sit just above the low floor
        let samples = series(&[25.0, 31.0, 31.0, 31.0]);
        assert!(!detect_decreasing_trend(&samples));
        assert!(!detect_high_variability(&samples));
        assert!(!detect_consistently_low(&samples));

        let assessment = assess_stress(&samples);
        assert!(!assessment.is_stressed);
        assert_eq!(assessment.level, StressLevel::High);
    }

    #[test]
    fn test_boolean_and_level_agree() {
        let cases = [
            vec![60.0, 57.5, 55.0, 52.5, 50.0],
            vec![50.0, 25.0, 52.0, 26.0, 50.0],
            vec![29.0, 28.0, 29.0, 28.0],
            vec![55.0, 56.0, 57.0, 58.0],
            vec![40.0, 41.0, 42.0, 43.0],
            vec![25.0, 31.0, 31.0, 31.0],
        ];

        for values in cases {
            let samples = series(&values);
            let assessment = assess_stress(&samples);
            assert_eq!(assessment.is_stressed, is_stressed(&samples));
            assert_eq!(assessment.is_stressed, assessment.level.is_pattern());
        }
    }

    #[test]
    fn test_order_invariance() {
        let sorted = series(&[50.0, 40.0, 28.0, 20.0, 12.0]);
        let mut shuffled = sorted.clone();
        shuffled.swap(0, 4);
        shuffled.swap(1, 3);

        assert_eq!(assess_stress(&sorted), assess_stress(&shuffled));
        assert_eq!(
            detect_decreasing_trend(&sorted),
            detect_decreasing_trend(&shuffled)
        );
    }
}

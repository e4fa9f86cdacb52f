//! Sample series normalization
//!
//! Callers hand the analyzer samples in whatever order their storage layer
//! returns them. Every public operation normalizes to ascending date order
//! first, so analysis output is invariant to input order.

use crate::error::AnalysisError;
use crate::types::HrvSample;
use std::collections::BTreeMap;

/// Return a new series sorted ascending by date. The input is not mutated.
pub fn sort_chronological(samples: &[HrvSample]) -> Vec<HrvSample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

/// Collapse a series to one sample per date by averaging same-day readings.
///
/// Output is ascending by date. Analysis operations assume at most one
/// sample per date; callers with raw multi-reading days aggregate here
/// first.
pub fn aggregate_daily(samples: &[HrvSample]) -> Vec<HrvSample> {
    let mut by_date: BTreeMap<chrono::NaiveDate, (f64, u32)> = BTreeMap::new();
    for sample in samples {
        let entry = by_date.entry(sample.date).or_insert((0.0, 0));
        entry.0 += sample.value_ms;
        entry.1 += 1;
    }

    by_date
        .into_iter()
        .map(|(date, (sum, count))| HrvSample::new(date, sum / count as f64))
        .collect()
}

/// Reject samples whose value is NaN or infinite.
///
/// Analysis functions are total over finite input; non-finite values would
/// silently poison every downstream average, so they fail fast here instead.
pub fn validate_samples(samples: &[HrvSample]) -> Result<(), AnalysisError> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.value_ms.is_finite() {
            return Err(AnalysisError::InvalidValue {
                index,
                value: sample.value_ms,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_sort_chronological() {
        let samples = vec![
            HrvSample::new(day(3), 44.0),
            HrvSample::new(day(1), 40.0),
            HrvSample::new(day(2), 42.0),
        ];

        let sorted = sort_chronological(&samples);
        let dates: Vec<NaiveDate> = sorted.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);

        // Input untouched
        assert_eq!(samples[0].date, day(3));
    }

    #[test]
    fn test_aggregate_daily_averages_same_day() {
        let samples = vec![
            HrvSample::new(day(2), 60.0),
            HrvSample::new(day(1), 40.0),
            HrvSample::new(day(2), 50.0),
        ];

        let daily = aggregate_daily(&samples);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, day(1));
        assert!((daily[0].value_ms - 40.0).abs() < 0.001);
        assert!((daily[1].value_ms - 55.0).abs() < 0.001);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let samples = vec![
            HrvSample::new(day(1), 40.0),
            HrvSample::new(day(2), f64::NAN),
        ];

        let err = validate_samples(&samples).unwrap_err();
        match err {
            AnalysisError::InvalidValue { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_accepts_finite() {
        let samples = vec![HrvSample::new(day(1), 40.0)];
        assert!(validate_samples(&samples).is_ok());
    }
}

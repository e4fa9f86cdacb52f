//! Insight report encoding
//!
//! Assembles the trend summary and stress assessment into a versioned JSON
//! report with producer and window metadata, ready for the host app or a
//! downstream service to consume.

use crate::error::AnalysisError;
use crate::series::{sort_chronological, validate_samples};
use crate::stress::assess_stress;
use crate::trend::compute_trend;
use crate::types::{HrvSample, InsightReport, ReportProducer, ReportWindow};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "hrv.insight.v1";

/// Report encoder carrying a stable producer instance id.
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode a sample series into an insight report.
    ///
    /// Fails fast on non-finite values. An empty series cannot carry a date
    /// window and is the one shape a report refuses; short non-empty series
    /// produce the analyzers' defined defaults.
    pub fn encode(&self, samples: &[HrvSample]) -> Result<InsightReport, AnalysisError> {
        validate_samples(samples)?;

        let sorted = sort_chronological(samples);
        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(AnalysisError::EmptySeries),
        };

        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let window = ReportWindow {
            sample_count: sorted.len(),
            start_date: first.date,
            end_date: last.date,
        };

        Ok(InsightReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            computed_at_utc: Utc::now().to_rfc3339(),
            window,
            trend: compute_trend(&sorted),
            stress: assess_stress(&sorted),
        })
    }

    /// Encode to a JSON string
    pub fn encode_to_json(&self, samples: &[HrvSample]) -> Result<String, AnalysisError> {
        let report = self.encode(samples)?;
        serde_json::to_string_pretty(&report).map_err(AnalysisError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StressLevel, Trend};
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
    fn test_encode_builds_window_and_metadata() {
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder
            .encode(&series(&[40.0, 42.0, 44.0, 46.0, 48.0, 50.0]))
            .unwrap();

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.window.sample_count, 6);
        assert_eq!(
            report.window.start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            report.window.end_date,
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
        );
        assert_eq!(report.trend.trend, Trend::Improving);
        assert!(!report.stress.is_stressed);
    }

    #[test]
    fn test_encode_to_json_round_trips() {
        let encoder = ReportEncoder::new();
        let json = encoder
            .encode_to_json(&series(&[29.0, 28.0, 29.0, 28.0]))
            .unwrap();

        let report: InsightReport = serde_json::from_str(&json).unwrap();
        assert!(report.stress.is_stressed);
        assert_eq!(report.stress.level, StressLevel::ConsistentlyHigh);

        // The level serializes as its label
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stress"]["level"], "consistently high stress");
        assert_eq!(value["trend"]["trend"], "neutral");
    }

    #[test]
    fn test_empty_series_is_refused() {
        let encoder = ReportEncoder::new();
        assert!(matches!(
            encoder.encode(&[]),
            Err(AnalysisError::EmptySeries)
        ));
    }

    #[test]
    fn test_non_finite_value_is_refused() {
        let encoder = ReportEncoder::new();
        let mut samples = series(&[40.0, 42.0]);
        samples[1].value_ms = f64::NAN;

        assert!(matches!(
            encoder.encode(&samples),
            Err(AnalysisError::InvalidValue { index: 1, .. })
        ));
    }
}

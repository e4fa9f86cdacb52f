//! Analysis orchestration
//!
//! This module provides the public API for hrv-insight: one-call analysis
//! of a sample series or raw JSON, and a reusable engine that keeps a stable
//! producer instance id across reports.

use crate::error::AnalysisError;
use crate::report::ReportEncoder;
use crate::schema::SampleAdapter;
use crate::types::{HrvSample, InsightReport};

/// Analyze a sample series into an insight report.
///
/// # Example
/// ```ignore
/// let report = analyze_samples(&samples)?;
/// println!("{}", report.stress.level.as_str());
/// ```
pub fn analyze_samples(samples: &[HrvSample]) -> Result<InsightReport, AnalysisError> {
    ReportEncoder::new().encode(samples)
}

/// Analyze a JSON array of `hrv.sample.v1` records into report JSON.
///
/// The input passes through the schema boundary, so malformed records fail
/// fast with a descriptive error.
pub fn analyze_json(json: &str) -> Result<String, AnalysisError> {
    let records = SampleAdapter::parse_array(json)?;
    let samples = SampleAdapter::to_samples(&records)?;
    ReportEncoder::new().encode_to_json(&samples)
}

/// Reusable engine for hosts that produce many reports.
///
/// Each [`analyze_samples`] call mints a fresh producer instance id; the
/// engine holds one encoder so consecutive reports from the same embedding
/// are attributable to the same instance.
pub struct InsightEngine {
    encoder: ReportEncoder,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with a fresh instance id
    pub fn new() -> Self {
        Self {
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an engine with a specific instance id
    pub fn with_instance_id(instance_id: String) -> Self {
        Self {
            encoder: ReportEncoder::with_instance_id(instance_id),
        }
    }

    /// Analyze a sample series
    pub fn analyze(&self, samples: &[HrvSample]) -> Result<InsightReport, AnalysisError> {
        self.encoder.encode(samples)
    }

    /// Analyze a JSON array of records into report JSON
    pub fn analyze_json(&self, json: &str) -> Result<String, AnalysisError> {
        let records = SampleAdapter::parse_array(json)?;
        let samples = SampleAdapter::to_samples(&records)?;
        self.encoder.encode_to_json(&samples)
    }

    /// Analyze NDJSON records into report JSON
    pub fn analyze_ndjson(&self, ndjson: &str) -> Result<String, AnalysisError> {
        let records = SampleAdapter::parse_ndjson(ndjson)?;
        let samples = SampleAdapter::to_samples(&records)?;
        self.encoder.encode_to_json(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StressLevel;
    use pretty_assertions::assert_eq;

    fn sample_json() -> &'static str {
        r#"[
            {"date": "2024-03-01", "value": 60.0},
            {"date": "2024-03-02", "value": 57.5},
            {"date": "2024-03-03", "value": 55.0},
            {"date": "2024-03-04", "value": 52.5},
            {"date": "2024-03-05", "value": 50.0}
        ]"#
    }

    #[test]
    fn test_analyze_json_end_to_end() {
        let json = analyze_json(sample_json()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // Slope -2.5 across the window: a decreasing trend
        assert_eq!(value["stress"]["is_stressed"], true);
        assert_eq!(value["stress"]["level"], "increasing stress detected");
        assert_eq!(value["window"]["sample_count"], 5);
    }

    #[test]
    fn test_analyze_json_rejects_malformed_records() {
        let result = analyze_json(r#"[{"date": "not a date", "value": 50.0}]"#);
        assert!(matches!(result, Err(AnalysisError::DateParse(_))));
    }

    #[test]
    fn test_engine_keeps_instance_id() {
        let engine = InsightEngine::with_instance_id("engine-1".to_string());

        let first = engine.analyze_json(sample_json()).unwrap();
        let second = engine.analyze_json(sample_json()).unwrap();

        let first: serde_json::Value = serde_json::from_str(&first).unwrap();
        let second: serde_json::Value = serde_json::from_str(&second).unwrap();
        assert_eq!(first["producer"]["instance_id"], "engine-1");
        assert_eq!(
            first["producer"]["instance_id"],
            second["producer"]["instance_id"]
        );
    }

    #[test]
    fn test_analyze_ndjson() {
        let ndjson = "{\"date\": \"2024-03-01\", \"value\": 40.0}\n{\"date\": \"2024-03-02\", \"value\": 41.0}\n{\"date\": \"2024-03-03\", \"value\": 42.0}\n";
        let engine = InsightEngine::new();
        let json = engine.analyze_ndjson(ndjson).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stress"]["is_stressed"], false);
        assert_eq!(value["stress"]["level"], "moderate stress");
    }

    #[test]
    fn test_insufficient_data_is_not_an_error() {
        let report = analyze_samples(&[HrvSample::new(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            48.0,
        )])
        .unwrap();

        assert!(!report.stress.is_stressed);
        assert_eq!(report.stress.level, StressLevel::InsufficientData);
        assert_eq!(report.trend.change_pct, 0.0);
    }
}

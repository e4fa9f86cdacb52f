//! hrv.sample.v1 input schema
//!
//! Wire form of a sample as the host app's storage and mock API layers emit
//! it: an ISO-8601 calendar date string plus a numeric value. Conversion to
//! [`HrvSample`] is the fail-fast boundary for malformed input; short or
//! empty series are never an error, bad dates and non-finite values always
//! are.

use crate::error::AnalysisError;
use crate::types::HrvSample;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current input schema version
pub const SCHEMA_VERSION: &str = "hrv.sample.v1";

/// Date format accepted for sample dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A sample record as found on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSample {
    /// Schema version; optional on input, checked when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    /// HRV in milliseconds
    pub value: f64,
    /// Originating source, e.g. "Apple Health"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl RawSample {
    /// Check the record without converting it.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some(version) = &self.schema_version {
            if version != SCHEMA_VERSION {
                return Err(AnalysisError::SchemaVersion {
                    expected: SCHEMA_VERSION.to_string(),
                    actual: version.clone(),
                });
            }
        }

        parse_date(&self.date)?;

        if !self.value.is_finite() {
            return Err(AnalysisError::InvalidValue {
                index: 0,
                value: self.value,
            });
        }

        Ok(())
    }

    /// Convert to an [`HrvSample`], failing fast on malformed input.
    pub fn to_sample(&self) -> Result<HrvSample, AnalysisError> {
        self.validate()?;
        Ok(HrvSample::new(parse_date(&self.date)?, self.value))
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, AnalysisError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| AnalysisError::DateParse(format!("{date}: {e}")))
}

/// Adapter for parsing sample records out of JSON input.
pub struct SampleAdapter;

impl SampleAdapter {
    /// Parse a JSON array of records.
    pub fn parse_array(json: &str) -> Result<Vec<RawSample>, AnalysisError> {
        let records: Vec<RawSample> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (one record per line, blank lines skipped).
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawSample>, AnalysisError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawSample>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(AnalysisError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }

    /// Convert a batch of records, failing on the first malformed one.
    pub fn to_samples(records: &[RawSample]) -> Result<Vec<HrvSample>, AnalysisError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record.to_sample().map_err(|e| match e {
                    AnalysisError::InvalidValue { value, .. } => {
                        AnalysisError::InvalidValue { index, value }
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Validate a batch of records, collecting every failure.
    pub fn validate_records(records: &[RawSample]) -> Vec<RecordValidation> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| RecordValidation {
                index,
                source_name: record.source_name.clone(),
                error: record.validate().err().map(|e| match e {
                    AnalysisError::InvalidValue { value, .. } => {
                        AnalysisError::InvalidValue { index, value }
                    }
                    other => other,
                }),
            })
            .filter(|r| r.error.is_some())
            .collect()
    }
}

/// Result of validating one record
#[derive(Debug)]
pub struct RecordValidation {
    pub index: usize,
    pub source_name: Option<String>,
    pub error: Option<AnalysisError>,
}

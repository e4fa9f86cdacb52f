//! Core types for hrv-insight
//!
//! This module defines the data structures that flow through the analysis:
//! dated samples in, trend summaries, stress assessments, and insight
//! reports out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single HRV measurement for one calendar day.
///
/// Values are RMSSD-style heart rate variability in milliseconds. Day
/// resolution; after upstream aggregation a date carries at most one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HrvSample {
    /// Calendar date of the measurement
    pub date: NaiveDate,
    /// HRV in milliseconds
    pub value_ms: f64,
}

impl HrvSample {
    pub fn new(date: NaiveDate, value_ms: f64) -> Self {
        Self { date, value_ms }
    }
}

/// Direction of the HRV trend over the analysis window.
///
/// Higher HRV generally indicates better recovery, so a rising series is
/// `Improving` even though the underlying metric is "variability".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Neutral => "neutral",
        }
    }
}

/// Trend classification with supporting statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Direction of the trend
    pub trend: Trend,
    /// Percent change between the older and recent half averages (1 decimal)
    pub change_pct: f64,
    /// Average of the recent half in milliseconds (1 decimal)
    pub recent_avg_ms: f64,
}

/// Human-readable stress level derived from the HRV series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressLevel {
    #[serde(rename = "increasing stress detected")]
    IncreasingStress,
    #[serde(rename = "fluctuating stress levels")]
    Fluctuating,
    #[serde(rename = "consistently high stress")]
    ConsistentlyHigh,
    #[serde(rename = "low stress")]
    Low,
    #[serde(rename = "moderate stress")]
    Moderate,
    #[serde(rename = "high stress")]
    High,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl StressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::IncreasingStress => "increasing stress detected",
            StressLevel::Fluctuating => "fluctuating stress levels",
            StressLevel::ConsistentlyHigh => "consistently high stress",
            StressLevel::Low => "low stress",
            StressLevel::Moderate => "moderate stress",
            StressLevel::High => "high stress",
            StressLevel::InsufficientData => "insufficient data",
        }
    }

    /// True for the three pattern-detector levels that mark the series
    /// as stressed, as opposed to the average-based fallback levels.
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            StressLevel::IncreasingStress
                | StressLevel::Fluctuating
                | StressLevel::ConsistentlyHigh
        )
    }
}

/// Composite stress verdict: the boolean aggregate plus its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressAssessment {
    /// True when any of the three stress patterns is present
    pub is_stressed: bool,
    /// Descriptive stress level
    pub level: StressLevel,
}

/// A self-reported mood rating for one calendar day (host app 1-5 scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodSample {
    pub date: NaiveDate,
    pub rating: f64,
}

/// An HRV measurement matched with a mood rating on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub hrv_ms: f64,
    pub mood: f64,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Date window covered by a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportWindow {
    pub sample_count: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Complete insight report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub window: ReportWindow,
    pub trend: TrendSummary,
    pub stress: StressAssessment,
}

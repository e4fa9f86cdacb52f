//! hrv-insight - On-device trend and stress inference engine for HRV time series
//!
//! The engine turns a short series of dated HRV samples into two verdicts:
//! a trend classification (midpoint-split percent change) and a stress
//! assessment (regression slope, pairwise variability, and absolute-floor
//! detectors combined under a priority rule).
//!
//! ## Modules
//!
//! - **Analysis**: [`trend`], [`stress`], and [`correlation`] over sorted sample series
//! - **Boundaries**: [`schema`] for fail-fast input parsing, [`report`] for versioned output

pub mod analyzer;
pub mod correlation;
pub mod error;
pub mod report;
pub mod schema;
pub mod series;
pub mod stats;
pub mod stress;
pub mod trend;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use analyzer::{analyze_json, analyze_samples, InsightEngine};
pub use correlation::pair_by_date;
pub use error::AnalysisError;
pub use report::{ReportEncoder, REPORT_VERSION};
pub use series::{aggregate_daily, sort_chronological, validate_samples};
pub use stress::{
    assess_stress, detect_consistently_low, detect_decreasing_trend, detect_high_variability,
    is_stressed, stress_level,
};
pub use trend::{compute_trend, compute_trend_windowed};

// Schema exports
pub use schema::{RawSample, SampleAdapter, SCHEMA_VERSION};

// Type exports
pub use types::{
    DailyReading, HrvSample, InsightReport, MoodSample, StressAssessment, StressLevel, Trend,
    TrendSummary,
};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "hrv-insight";

//! Trend classification
//!
//! Splits the chronologically sorted series at its midpoint and compares the
//! average of the older half against the recent half. The resulting percent
//! change classifies the series as improving, declining, or neutral.

use crate::series::sort_chronological;
use crate::stats::{mean, round1};
use crate::types::{HrvSample, Trend, TrendSummary};

/// Percent change beyond which a series counts as improving (above) or
/// declining (below the negation). Fixed by the host app's insight rules.
pub const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Classify the trend of an HRV series.
///
/// Input order does not matter; the series is sorted by date internally.
/// Fewer than 2 samples is a defined edge case, not an error: the result is
/// neutral with 0 change. When the length is odd the extra sample belongs to
/// the recent half.
pub fn compute_trend(samples: &[HrvSample]) -> TrendSummary {
    compute_trend_windowed(samples, samples.len())
}

/// Classify the trend over the most recent `window` samples.
///
/// The host app fetches a bounded number of days (typically 14) before
/// asking for a trend; this variant applies the same bound to an already
/// loaded series. A window of zero or more than the series length means the
/// whole series.
pub fn compute_trend_windowed(samples: &[HrvSample], window: usize) -> TrendSummary {
    let sorted = sort_chronological(samples);
    let windowed = if window == 0 || window >= sorted.len() {
        &sorted[..]
    } else {
        &sorted[sorted.len() - window..]
    };
    let values: Vec<f64> = windowed.iter().map(|s| s.value_ms).collect();

    if values.len() < 2 {
        return TrendSummary {
            trend: Trend::Neutral,
            change_pct: 0.0,
            recent_avg_ms: round1(mean(&values).unwrap_or(0.0)),
        };
    }

    let midpoint = values.len() / 2;
    let older_avg = mean(&values[..midpoint]).unwrap_or(0.0);
    let recent_avg = mean(&values[midpoint..]).unwrap_or(0.0);

    // A zero baseline has no defined percent change
    if older_avg == 0.0 {
        return TrendSummary {
            trend: Trend::Neutral,
            change_pct: 0.0,
            recent_avg_ms: round1(recent_avg),
        };
    }

    let change_pct = round1((recent_avg - older_avg) / older_avg * 100.0);

    let trend = if change_pct > TREND_THRESHOLD_PCT {
        Trend::Improving
    } else if change_pct < -TREND_THRESHOLD_PCT {
        Trend::Declining
    } else {
        Trend::Neutral
    };

    TrendSummary {
        trend,
        change_pct,
        recent_avg_ms: round1(recent_avg),
    }
}

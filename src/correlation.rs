//! HRV / mood pairing
//!
//! The host app charts HRV against self-reported mood. This module does the
//! data side of that view: match the two series by calendar date and return
//! the paired readings in chronological order.

use crate::series::sort_chronological;
use crate::types::{DailyReading, HrvSample, MoodSample};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Pair HRV samples with mood ratings recorded on the same date.
///
/// Dates present in only one of the series are dropped. Output is ascending
/// by date with one reading per date; if a date somehow carries several HRV
/// samples the latest one in date order wins.
pub fn pair_by_date(hrv: &[HrvSample], moods: &[MoodSample]) -> Vec<DailyReading> {
    if hrv.is_empty() || moods.is_empty() {
        return Vec::new();
    }

    let mut readings: BTreeMap<NaiveDate, DailyReading> = BTreeMap::new();
    for sample in sort_chronological(hrv) {
        if let Some(mood) = moods.iter().find(|m| m.date == sample.date) {
            readings.insert(
                sample.date,
                DailyReading {
                    date: sample.date,
                    hrv_ms: sample.value_ms,
                    mood: mood.rating,
                },
            );
        }
    }

    readings.into_values().collect()
}

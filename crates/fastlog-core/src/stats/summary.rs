//! Aggregate statistics over completed fasts.
//!
//! Everything here is a pure function of the fast list. Empty input yields
//! zeros, never an error.

use serde::{Deserialize, Serialize};

use crate::session::Fast;

/// Summary card values, all durations in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastStats {
    pub total_fasts: usize,
    pub total_duration: i64,
    pub average_duration: i64,
    pub max_duration: i64,
    /// The percentile reported in `percentile_duration`.
    pub percentile: f64,
    pub percentile_duration: i64,
}

impl FastStats {
    /// Stats with the 90th percentile.
    pub fn from_fasts(fasts: &[Fast]) -> Self {
        Self::with_percentile(fasts, 90.0)
    }

    pub fn with_percentile(fasts: &[Fast], p: f64) -> Self {
        Self {
            total_fasts: total_fasts(fasts),
            total_duration: total_duration(fasts),
            average_duration: average_duration(fasts),
            max_duration: max_duration(fasts),
            percentile: p,
            percentile_duration: percentile(fasts, p),
        }
    }
}

pub fn total_fasts(fasts: &[Fast]) -> usize {
    fasts.len()
}

fn wide_total(fasts: &[Fast]) -> i128 {
    fasts.iter().map(|f| i128::from(f.duration)).sum()
}

fn clamp_to_i64(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Sum of durations, saturating at the `i64` bounds.
pub fn total_duration(fasts: &[Fast]) -> i64 {
    clamp_to_i64(wide_total(fasts))
}

/// Floor of the mean duration; 0 for no fasts.
pub fn average_duration(fasts: &[Fast]) -> i64 {
    if fasts.is_empty() {
        return 0;
    }
    clamp_to_i64(wide_total(fasts).div_euclid(fasts.len() as i128))
}

pub fn max_duration(fasts: &[Fast]) -> i64 {
    fasts.iter().map(|f| f.duration).max().unwrap_or(0)
}

/// Nearest-rank percentile of fast durations.
///
/// Sorted ascending, the value at `ceil(p / 100 * n) - 1`, clamped into
/// range. No interpolation. 0 for no fasts.
pub fn percentile(fasts: &[Fast], p: f64) -> i64 {
    let mut durations: Vec<i64> = fasts.iter().map(|f| f.duration).collect();
    durations.sort_unstable();
    nearest_rank(&durations, p)
}

/// Nearest-rank lookup in an ascending slice.
pub fn nearest_rank(sorted: &[i64], p: f64) -> i64 {
    let n = sorted.len();
    if n == 0 {
        return 0;
    }
    let rank = ((p / 100.0) * n as f64).ceil();
    let index = if rank.is_nan() {
        0
    } else {
        (rank as i64 - 1).clamp(0, n as i64 - 1) as usize
    };
    sorted[index]
}

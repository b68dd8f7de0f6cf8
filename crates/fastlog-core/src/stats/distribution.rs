//! Fast length distribution buckets.

use serde::{Deserialize, Serialize};

use crate::session::Fast;

/// Half-open hour ranges a fast can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Under 12 hours
    UnderTwelve,
    /// [12h, 16h)
    TwelveToSixteen,
    /// [16h, 20h)
    SixteenToTwenty,
    /// 20 hours or more
    TwentyPlus,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::UnderTwelve,
        DurationBucket::TwelveToSixteen,
        DurationBucket::SixteenToTwenty,
        DurationBucket::TwentyPlus,
    ];

    pub fn for_hours(hours: f64) -> Self {
        if hours < 12.0 {
            DurationBucket::UnderTwelve
        } else if hours < 16.0 {
            DurationBucket::TwelveToSixteen
        } else if hours < 20.0 {
            DurationBucket::SixteenToTwenty
        } else {
            DurationBucket::TwentyPlus
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::UnderTwelve => "< 12h",
            DurationBucket::TwelveToSixteen => "12h - 16h",
            DurationBucket::SixteenToTwenty => "16h - 20h",
            DurationBucket::TwentyPlus => "20h+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub bucket: DurationBucket,
    pub label: String,
    pub count: usize,
}

/// Count fasts per bucket, in bucket order. Empty buckets are left out.
pub fn distribution(fasts: &[Fast]) -> Vec<BucketCount> {
    let mut counts = [0usize; 4];
    for fast in fasts {
        let bucket = DurationBucket::for_hours(fast.duration_hours());
        counts[bucket as usize] += 1;
    }

    DurationBucket::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(bucket, count)| BucketCount {
            bucket: *bucket,
            label: bucket.label().to_string(),
            count,
        })
        .collect()
}

//! Statistics module for fastlog
//!
//! Pure derivations over the completed fast list: summary card values,
//! the length distribution, and chart series. Nothing here holds state;
//! callers recompute on every render.

mod charts;
mod distribution;
mod summary;

pub use charts::{duration_series, format_hour, short_date, window_series, DurationPoint, WindowPoint};
pub use distribution::{distribution, BucketCount, DurationBucket};
pub use summary::{
    average_duration, max_duration, nearest_rank, percentile, total_duration, total_fasts,
    FastStats,
};

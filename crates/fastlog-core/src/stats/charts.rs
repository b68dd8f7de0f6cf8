//! Chart series derived from completed fasts.
//!
//! Both series are ordered oldest start first and evaluated in the caller's
//! time zone, since the axes are local calendar dates and clock hours.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Fast;

/// One bar of the duration chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationPoint {
    pub id: String,
    /// Local start date, e.g. `"Mar 1"`.
    pub date: String,
    /// Hours rounded to one decimal.
    pub duration_hours: f64,
    pub meets_target: bool,
}

/// One point of the fasting window chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPoint {
    pub id: String,
    pub date: String,
    /// Local clock hour of the start as a decimal, `14.5` for 14:30.
    pub start_hour: f64,
    /// Local clock hour of the end; 24 is added when the fast crosses midnight.
    pub end_hour: f64,
    pub duration_hours: f64,
    pub mid_hour: f64,
}

fn sorted_by_start(fasts: &[Fast]) -> Vec<&Fast> {
    let mut sorted: Vec<&Fast> = fasts.iter().collect();
    sorted.sort_by_key(|f| f.start_time);
    sorted
}

fn local<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(ts).map(|utc| utc.with_timezone(tz))
}

fn decimal_hour<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.hour() as f64 + dt.minute() as f64 / 60.0
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Short local date label, `"Mar 1"`.
pub fn short_date<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local(ts, tz)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// Bars for the duration chart. Fasts of at least `target_hours` are
/// flagged so they can be highlighted.
pub fn duration_series<Tz: TimeZone>(fasts: &[Fast], tz: &Tz, target_hours: f64) -> Vec<DurationPoint>
where
    Tz::Offset: std::fmt::Display,
{
    sorted_by_start(fasts)
        .into_iter()
        .map(|fast| {
            let duration_hours = round_tenth(fast.duration_hours());
            DurationPoint {
                id: fast.id.clone(),
                date: short_date(fast.start_time, tz),
                duration_hours,
                meets_target: duration_hours >= target_hours,
            }
        })
        .collect()
}

/// Points for the fasting window chart.
pub fn window_series<Tz: TimeZone>(fasts: &[Fast], tz: &Tz) -> Vec<WindowPoint>
where
    Tz::Offset: std::fmt::Display,
{
    sorted_by_start(fasts)
        .into_iter()
        .filter_map(|fast| {
            let start = local(fast.start_time, tz)?;
            let end = local(fast.end_time, tz)?;
            let start_hour = decimal_hour(&start);
            let mut end_hour = decimal_hour(&end);
            if end_hour < start_hour {
                end_hour += 24.0;
            }
            Some(WindowPoint {
                id: fast.id.clone(),
                date: start.format("%b %-d").to_string(),
                start_hour,
                end_hour,
                duration_hours: round_tenth(fast.duration_hours()),
                mid_hour: start_hour + (end_hour - start_hour) / 2.0,
            })
        })
        .collect()
}

/// 12-hour label for a decimal hour, wrapping past midnight: `14.5` -> `"2PM"`.
pub fn format_hour(decimal_hour: f64) -> String {
    let h = (decimal_hour.floor() as i64).rem_euclid(24);
    let suffix = if h >= 12 { "PM" } else { "AM" };
    let display = match h % 12 {
        0 => 12,
        other => other,
    };
    format!("{display}{suffix}")
}

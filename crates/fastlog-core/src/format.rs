//! Display formatting for durations, clocks and dates.
//!
//! Durations are milliseconds. Calendar output is rendered in the caller's
//! time zone so the CLI can pass `chrono::Local` and tests a fixed offset.

use chrono::{DateTime, Days, TimeZone, Utc};

use crate::session::Fast;
use crate::{MS_PER_HOUR, MS_PER_MINUTE};

/// Floored hours, then the floored minutes of the signed remainder, so a
/// negative half hour reads `-1h -30m`.
fn hours_minutes(ms: i64) -> (i64, i64) {
    let hours = ms.div_euclid(MS_PER_HOUR);
    let minutes = (ms % MS_PER_HOUR).div_euclid(MS_PER_MINUTE);
    (hours, minutes)
}

/// Summary-card duration: `"0h"`, `"30m"`, `"16h 5m"`.
pub fn format_duration(ms: i64) -> String {
    if ms == 0 {
        return "0h".to_string();
    }
    match hours_minutes(ms) {
        (0, minutes) => format!("{minutes}m"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

/// History-list duration, always with both units: `"0h 30m"`.
pub fn format_log_duration(ms: i64) -> String {
    let (hours, minutes) = hours_minutes(ms);
    format!("{hours}h {minutes}m")
}

/// Running timer face, `"HH:MM:SS"`. Negative input shows as zero.
pub fn format_elapsed(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn local<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(ts).map(|utc| utc.with_timezone(tz))
}

/// `"Today"`, `"Yesterday"`, or `"Monday, Mar 1"` relative to `now`.
pub fn format_day_label<Tz: TimeZone>(ts: i64, now: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let (Some(date), Some(today)) = (local(ts, tz), local(now, tz)) else {
        return String::new();
    };
    let day = date.date_naive();
    let today = today.date_naive();
    if day == today {
        "Today".to_string()
    } else if today.checked_sub_days(Days::new(1)) == Some(day) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %b %-d").to_string()
    }
}

/// `"9:05 AM - 5:30 PM"`.
pub fn format_time_range<Tz: TimeZone>(start: i64, end: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let fmt = |ts| {
        local(ts, tz)
            .map(|dt| dt.format("%-I:%M %p").to_string())
            .unwrap_or_default()
    };
    format!("{} - {}", fmt(start), fmt(end))
}

/// Zero-padded clock time, `"09:05 AM"`.
pub fn format_clock<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local(ts, tz)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Confirmation text shown before deleting a fast.
pub fn delete_prompt<Tz: TimeZone>(fast: &Fast, now: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Delete {} fast from {}?",
        format_log_duration(fast.duration),
        format_day_label(fast.start_time, now, tz)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const HOUR: i64 = 3_600_000;
    const MINUTE: i64 = 60_000;
    // 2024-03-01T08:00:00Z, a Friday
    const MAR_1_8AM: i64 = 1_709_280_000_000;

    #[test]
    fn summary_duration() {
        assert_eq!(format_duration(0), "0h");
        assert_eq!(format_duration(30 * MINUTE), "30m");
        assert_eq!(format_duration(76 * HOUR), "76h 0m");
        assert_eq!(format_duration(16 * HOUR + 5 * MINUTE + 59_999), "16h 5m");
    }

    #[test]
    fn log_duration_keeps_hours() {
        assert_eq!(format_log_duration(30 * MINUTE), "0h 30m");
        assert_eq!(format_log_duration(0), "0h 0m");
    }

    #[test]
    fn negative_durations_keep_sign_on_both_units() {
        assert_eq!(format_log_duration(-30 * MINUTE), "-1h -30m");
        assert_eq!(format_duration(-30 * MINUTE), "-1h -30m");
        assert_eq!(format_log_duration(-2 * HOUR - 90_001), "-3h -2m");
    }

    #[test]
    fn elapsed_clock_face() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(HOUR + 2 * MINUTE + 3_999), "01:02:03");
        assert_eq!(format_elapsed(100 * HOUR), "100:00:00");
        assert_eq!(format_elapsed(-5_000), "00:00:00");
    }

    #[test]
    fn day_labels() {
        let now = MAR_1_8AM + 4 * HOUR;
        assert_eq!(format_day_label(MAR_1_8AM, now, &Utc), "Today");
        assert_eq!(format_day_label(MAR_1_8AM - 24 * HOUR, now, &Utc), "Yesterday");
        assert_eq!(
            format_day_label(MAR_1_8AM - 48 * HOUR, now, &Utc),
            "Wednesday, Feb 28"
        );
    }

    #[test]
    fn day_label_respects_time_zone() {
        // 20:00 UTC on Mar 1 is already Mar 2 in UTC+9.
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let ts = MAR_1_8AM + 12 * HOUR;
        assert_eq!(format_day_label(ts, ts, &tz), "Today");
        assert_eq!(format_day_label(MAR_1_8AM, ts, &tz), "Yesterday");
    }

    #[test]
    fn time_range_and_clock() {
        let end = MAR_1_8AM + 9 * HOUR + 30 * MINUTE;
        assert_eq!(format_time_range(MAR_1_8AM, end, &Utc), "8:00 AM - 5:30 PM");
        assert_eq!(format_clock(MAR_1_8AM + 5 * MINUTE, &Utc), "08:05 AM");
    }

    #[test]
    fn prompt_names_duration_and_day() {
        let fast = Fast {
            id: "a".into(),
            start_time: MAR_1_8AM,
            end_time: MAR_1_8AM + 16 * HOUR,
            duration: 16 * HOUR,
        };
        assert_eq!(
            delete_prompt(&fast, MAR_1_8AM + HOUR, &Utc),
            "Delete 16h 0m fast from Today?"
        );
    }
}

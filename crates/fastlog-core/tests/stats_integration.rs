//! Integration tests for statistics and their formatted summary values.

use fastlog_core::format::format_duration;
use fastlog_core::stats::{distribution, duration_series, percentile, window_series};
use fastlog_core::{Fast, FastStats, MemoryStorage, SessionStore, STORAGE_KEY};

const HOUR: i64 = 3_600_000;
const MAR_1_8AM: i64 = 1_709_280_000_000;

fn fasts_of_hours(hours: &[i64]) -> Vec<Fast> {
    hours
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let start = MAR_1_8AM + i as i64 * 24 * HOUR;
            Fast {
                id: format!("f{i}"),
                start_time: start,
                end_time: start + h * HOUR,
                duration: h * HOUR,
            }
        })
        .collect()
}

#[test]
fn test_p90_nearest_rank_law() {
    let fasts = fasts_of_hours(&[10, 12, 14, 16, 24]);
    assert_eq!(percentile(&fasts, 90.0), 24 * HOUR);
}

#[test]
fn test_empty_summary_formats_as_zero() {
    let stats = FastStats::from_fasts(&[]);
    assert_eq!(stats.total_fasts, 0);
    assert_eq!(format_duration(stats.total_duration), "0h");
    assert_eq!(format_duration(stats.average_duration), "0h");
    assert!(distribution(&[]).is_empty());
}

#[test]
fn test_summary_cards_for_a_week() {
    let fasts = fasts_of_hours(&[10, 12, 14, 16, 24]);
    let stats = FastStats::from_fasts(&fasts);
    assert_eq!(format_duration(stats.total_duration), "76h 0m");
    assert_eq!(format_duration(stats.average_duration), "15h 12m");
    assert_eq!(format_duration(stats.max_duration), "24h 0m");
    assert_eq!(format_duration(stats.percentile_duration), "24h 0m");
}

#[test]
fn test_distribution_and_charts_agree_on_count() {
    let fasts = fasts_of_hours(&[10, 12, 14, 16, 24]);
    let total: usize = distribution(&fasts).iter().map(|b| b.count).sum();
    assert_eq!(total, fasts.len());
    assert_eq!(duration_series(&fasts, &chrono::Utc, 16.0).len(), fasts.len());
    assert_eq!(window_series(&fasts, &chrono::Utc).len(), fasts.len());
}

#[test]
fn test_loaded_oversized_durations_still_summarize() {
    let half = i64::MAX / 2 + 1;
    let raw = format!(
        r#"{{"fasts":[{{"id":"a","startTime":0,"endTime":1,"duration":{half}}},{{"id":"b","startTime":0,"endTime":1,"duration":{half}}}]}}"#
    );
    let store = SessionStore::open(MemoryStorage::with_slot(STORAGE_KEY, &raw));
    assert_eq!(store.fasts().len(), 2);

    let stats = FastStats::from_fasts(store.fasts());
    assert_eq!(stats.total_fasts, 2);
    assert_eq!(stats.total_duration, i64::MAX);
    assert_eq!(stats.average_duration, half);
    assert_eq!(stats.percentile_duration, half);
    assert_eq!(distribution(store.fasts())[0].count, 2);
}

use std::error::Error;

use chrono::Local;
use clap::Subcommand;
use fastlog_core::format::format_duration;
use fastlog_core::stats::{distribution, duration_series, format_hour, window_series};
use fastlog_core::{Config, FastStats};
use serde_json::json;

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Total, average, longest and percentile fast durations
    Summary,
    /// Count of fasts per duration range
    Distribution,
    /// Chart series over completed fasts
    Chart {
        #[command(subcommand)]
        kind: ChartKind,
    },
}

#[derive(Subcommand)]
pub enum ChartKind {
    /// Duration per fast, flagged against the target hours
    Duration,
    /// Local start and end hour per fast
    Window,
}

pub fn run(action: StatsAction, config: &Config) -> Result<(), Box<dyn Error>> {
    let store = open_store(config)?;
    let fasts = store.fasts();

    let output = match action {
        StatsAction::Summary => {
            let stats = FastStats::with_percentile(fasts, config.stats.percentile);
            json!({
                "totalFasts": stats.total_fasts,
                "totalTime": format_duration(stats.total_duration),
                "average": format_duration(stats.average_duration),
                "longest": format_duration(stats.max_duration),
                "percentile": format_duration(stats.percentile_duration),
                "raw": stats,
            })
        }
        StatsAction::Distribution => serde_json::to_value(distribution(fasts))?,
        StatsAction::Chart { kind: ChartKind::Duration } => serde_json::to_value(duration_series(
            fasts,
            &Local,
            config.chart.target_hours,
        ))?,
        StatsAction::Chart { kind: ChartKind::Window } => {
            let points: Vec<_> = window_series(fasts, &Local)
                .into_iter()
                .map(|p| {
                    json!({
                        "startLabel": format_hour(p.start_hour),
                        "endLabel": format_hour(p.end_hour),
                        "point": p,
                    })
                })
                .collect();
            serde_json::Value::Array(points)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

use std::error::Error;
use std::io::{BufRead, Write};

use chrono::Local;
use clap::Subcommand;
use fastlog_core::format::{delete_prompt, format_day_label, format_log_duration, format_time_range};
use fastlog_core::input::parse_datetime_local;
use fastlog_core::{Clock, Config, FastUpdate, ValidationError};

use super::{open_store, print_outcome};

#[derive(Subcommand)]
pub enum LogAction {
    /// List completed fasts, newest first
    List {
        /// Print the raw fast records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a completed fast
    Delete {
        /// Fast ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Change the start and/or end of a completed fast
    Edit {
        /// Fast ID
        id: String,
        /// New start, local YYYY-MM-DDTHH:MM
        #[arg(long)]
        start: Option<String>,
        /// New end, local YYYY-MM-DDTHH:MM
        #[arg(long)]
        end: Option<String>,
    },
}

pub fn run(action: LogAction, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(config)?;

    match action {
        LogAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.fasts())?);
                return Ok(());
            }
            if store.fasts().is_empty() {
                println!("No fasts yet. Start one to see it here!");
                return Ok(());
            }
            let now = store.clock().now_ms();
            for fast in store.fasts() {
                println!(
                    "{:<20} {:>8}  {}  [{}]",
                    format_day_label(fast.start_time, now, &Local),
                    format_log_duration(fast.duration),
                    format_time_range(fast.start_time, fast.end_time, &Local),
                    fast.id
                );
            }
        }
        LogAction::Delete { id, yes } => {
            let Some(fast) = store.find_fast(&id) else {
                eprintln!("no fast with id {id}");
                return print_outcome(&store, None);
            };
            if !yes {
                let prompt = delete_prompt(fast, store.clock().now_ms(), &Local);
                if !confirm(&prompt)? {
                    println!("cancelled");
                    return Ok(());
                }
            }
            let event = store.delete_fast(&id)?;
            print_outcome(&store, event)?;
        }
        LogAction::Edit { id, start, end } => {
            let update = FastUpdate {
                start_time: start.map(|s| parse_datetime_local(&s, &Local)).transpose()?,
                end_time: end.map(|s| parse_datetime_local(&s, &Local)).transpose()?,
            };
            if update.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "edit".into(),
                    message: "pass --start and/or --end".into(),
                }
                .into());
            }
            let event = store.update_fast(&id, update)?;
            if event.is_none() {
                eprintln!("no fast with id {id}");
            }
            print_outcome(&store, event)?;
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

use std::error::Error;

use chrono::Local;
use clap::Subcommand;
use fastlog_core::format::{format_clock, format_elapsed};
use fastlog_core::input::parse_datetime_local;
use fastlog_core::{ActiveFastUpdate, Config, ElapsedDisplay};

use super::{open_store, print_outcome};

#[derive(Subcommand)]
pub enum FastAction {
    /// Start a new fast now
    Start,
    /// End the active fast now and add it to the log
    End,
    /// Show the current state
    Status,
    /// Change when the active fast started
    SetStart {
        /// Local date-time, YYYY-MM-DDTHH:MM
        at: String,
    },
    /// Show the elapsed time of the active fast, once per second
    Watch {
        /// Stop after this many ticks (runs until interrupted otherwise)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

pub fn run(action: FastAction, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(config)?;

    match action {
        FastAction::Start => {
            let event = store.start_fast()?;
            print_outcome(&store, event)?;
        }
        FastAction::End => {
            let event = store.end_fast()?;
            if event.is_none() {
                eprintln!("no active fast");
            }
            print_outcome(&store, event)?;
        }
        FastAction::Status => {
            print_outcome(&store, None)?;
        }
        FastAction::SetStart { at } => {
            let start_time = parse_datetime_local(&at, &Local)?;
            let event = store.update_active_fast(ActiveFastUpdate {
                start_time: Some(start_time),
            })?;
            if store.active_fast().is_none() {
                eprintln!("no active fast");
            }
            print_outcome(&store, event)?;
        }
        FastAction::Watch { ticks } => {
            let Some(active) = store.active_fast() else {
                println!("Not fasting");
                return Ok(());
            };
            println!("Started {}", format_clock(active.start_time, &Local));

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(async {
                let mut display = ElapsedDisplay::new(store.clock());
                display.sync(store.active_fast());
                let Some(mut rx) = display.subscribe() else {
                    return;
                };
                let mut shown = 0u64;
                while rx.changed().await.is_ok() {
                    println!("{}", format_elapsed(*rx.borrow_and_update()));
                    shown += 1;
                    if ticks.is_some_and(|limit| shown >= limit) {
                        break;
                    }
                }
            });
        }
    }
    Ok(())
}

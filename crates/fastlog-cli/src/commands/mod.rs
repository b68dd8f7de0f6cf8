pub mod config;
pub mod fast;
pub mod log;
pub mod stats;

use std::error::Error;
use std::sync::Arc;

use fastlog_core::session::{SystemClock, UuidGenerator};
use fastlog_core::{Config, Database, Event, SessionStore};

/// Open the session store configured for this data directory.
pub fn open_store(config: &Config) -> Result<SessionStore<Database>, Box<dyn Error>> {
    let db = Database::open()?;
    Ok(SessionStore::load(
        db,
        &config.storage.key,
        Arc::new(SystemClock),
        Box::new(UuidGenerator),
    ))
}

/// Print the event for an effective change, or the current snapshot for a no-op.
pub fn print_outcome(
    store: &SessionStore<Database>,
    event: Option<Event>,
) -> Result<(), Box<dyn Error>> {
    let event = event.unwrap_or_else(|| store.snapshot_event());
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

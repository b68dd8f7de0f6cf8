mod config;
pub mod database;
pub mod memory;

pub use config::{ChartConfig, Config, LogConfig, StatsConfig, StorageConfig};
pub use database::Database;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use crate::error::StorageError;

/// Slot key the whole [`AppState`](crate::session::AppState) is stored under.
pub const STORAGE_KEY: &str = "fast-app-data";

/// A synchronous string key-value slot store.
///
/// Writes fully overwrite the previous value under the same key.
pub trait SlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Returns the fastlog data directory, creating it if needed.
///
/// `FASTLOG_DATA_DIR` overrides the location entirely. Otherwise this is
/// `~/.config/fastlog/`, or `~/.config/fastlog-dev/` with `FASTLOG_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FASTLOG_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FASTLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("fastlog-dev")
            } else {
                base_dir.join("fastlog")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

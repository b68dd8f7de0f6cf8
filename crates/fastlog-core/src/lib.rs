//! # fastlog Core Library
//!
//! This library provides the core business logic for the fastlog
//! intermittent-fasting tracker. All operations are available via the
//! standalone CLI binary; any other front end is a thin layer over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Session Store**: the single owner of fasting state. Starts, ends,
//!   edits and deletes fasts, and writes the full state to a storage slot
//!   after every effective change
//! - **Storage**: string slots in SQLite (or memory) and TOML configuration
//! - **Stats**: pure summary, distribution and chart derivations
//! - **Timer**: the scoped once-per-second elapsed display ticker
//!
//! ## Key Components
//!
//! - [`SessionStore`]: fast session state machine and persistence
//! - [`Database`]: SQLite slot storage
//! - [`Config`]: application configuration management
//! - [`FastStats`]: summary statistics

pub mod error;
pub mod events;
pub mod format;
pub mod input;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use session::{ActiveFast, ActiveFastUpdate, AppState, Clock, Fast, FastUpdate, SessionStore};
pub use stats::{BucketCount, DurationBucket, FastStats};
pub use storage::{Config, Database, MemoryStorage, SlotStorage, STORAGE_KEY};
pub use timer::{ElapsedDisplay, ElapsedTicker};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;

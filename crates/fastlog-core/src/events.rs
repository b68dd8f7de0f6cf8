use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{ActiveFast, Fast};

/// Every effective state change in the session store produces an Event.
/// No-ops produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    FastStarted {
        id: String,
        start_time: i64,
        /// Id of an active fast that was discarded by this start.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        replaced: Option<String>,
        at: DateTime<Utc>,
    },
    FastEnded {
        fast: Fast,
        at: DateTime<Utc>,
    },
    FastDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    FastUpdated {
        fast: Fast,
        at: DateTime<Utc>,
    },
    ActiveFastUpdated {
        active_fast: ActiveFast,
        at: DateTime<Utc>,
    },
    /// Read-only view of the store, emitted by status queries.
    StateSnapshot {
        active_fast: Option<ActiveFast>,
        elapsed_ms: i64,
        total_fasts: usize,
        at: DateTime<Utc>,
    },
}

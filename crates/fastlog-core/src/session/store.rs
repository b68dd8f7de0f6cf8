//! The session store: single owner and writer of [`AppState`].
//!
//! Every operation computes a new state from the current one. An effective
//! change swaps the new state in and is followed by exactly one full-state
//! write to the storage slot; a no-op leaves the state `Arc` untouched and
//! writes nothing.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = SessionStore::open(Database::open()?);
//! store.start_fast()?;
//! // ... later
//! store.end_fast()?;
//! ```

use std::sync::Arc;

use chrono::Utc;

use super::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use super::model::{ActiveFast, ActiveFastUpdate, AppState, Fast, FastUpdate};
use crate::error::Result;
use crate::events::Event;
use crate::storage::{SlotStorage, STORAGE_KEY};

pub struct SessionStore<S: SlotStorage> {
    state: Arc<AppState>,
    storage: S,
    key: String,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    revision: u64,
}

impl<S: SlotStorage> SessionStore<S> {
    /// Load from `storage` under the default key with the system clock and
    /// random ids.
    pub fn open(storage: S) -> Self {
        Self::load(
            storage,
            STORAGE_KEY,
            Arc::new(SystemClock),
            Box::new(UuidGenerator),
        )
    }

    /// Load state from `storage[key]`.
    ///
    /// An absent slot yields the empty state. A slot that cannot be read or
    /// parsed is logged and also yields the empty state; the stored value is
    /// left as is until the next write replaces it.
    pub fn load(
        storage: S,
        key: &str,
        clock: Arc<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let state = match storage.read(key) {
            Ok(Some(saved)) => match serde_json::from_str::<AppState>(&saved) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(key, error = %e, "failed to parse saved state, starting empty");
                    AppState::default()
                }
            },
            Ok(None) => AppState::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read saved state, starting empty");
                AppState::default()
            }
        };

        Self {
            state: Arc::new(state),
            storage,
            key: key.to_string(),
            clock,
            ids,
            revision: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shared handle to the current state. Pointer-equal across no-ops.
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn active_fast(&self) -> Option<&ActiveFast> {
        self.state.active_fast.as_ref()
    }

    /// Completed fasts, newest-completed first.
    pub fn fasts(&self) -> &[Fast] {
        &self.state.fasts
    }

    pub fn find_fast(&self, id: &str) -> Option<&Fast> {
        self.state.find_fast(id)
    }

    /// Number of effective mutations since load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Milliseconds since the active fast started, 0 when idle.
    pub fn elapsed_ms(&self) -> i64 {
        self.active_fast()
            .map(|a| self.clock.now_ms().saturating_sub(a.start_time))
            .unwrap_or(0)
    }

    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            active_fast: self.state.active_fast.clone(),
            elapsed_ms: self.elapsed_ms(),
            total_fasts: self.state.fasts.len(),
            at: Utc::now(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new fast now. Any fast already active is discarded.
    pub fn start_fast(&mut self) -> Result<Option<Event>> {
        let active = ActiveFast {
            id: self.ids.next_id(),
            start_time: self.clock.now_ms(),
        };
        let replaced = self.state.active_fast.as_ref().map(|a| a.id.clone());
        if let Some(prev) = &replaced {
            tracing::warn!(replaced = %prev, "starting a fast while one is active, discarding it");
        }
        let next = self.state.with_active(active.clone());
        self.commit(next)?;
        Ok(Some(Event::FastStarted {
            id: active.id,
            start_time: active.start_time,
            replaced,
            at: Utc::now(),
        }))
    }

    /// Finalize the active fast now. No-op when idle.
    pub fn end_fast(&mut self) -> Result<Option<Event>> {
        let Some((next, fast)) = self.state.ended_at(self.clock.now_ms())? else {
            return Ok(None);
        };
        self.commit(next)?;
        Ok(Some(Event::FastEnded {
            fast,
            at: Utc::now(),
        }))
    }

    /// Remove fast `id`. No-op when absent.
    pub fn delete_fast(&mut self, id: &str) -> Result<Option<Event>> {
        let Some((next, removed)) = self.state.without_fast(id) else {
            return Ok(None);
        };
        self.commit(next)?;
        Ok(Some(Event::FastDeleted {
            id: removed.id,
            at: Utc::now(),
        }))
    }

    /// Merge `update` into fast `id`, recomputing its duration.
    ///
    /// No-op when `id` is absent.
    ///
    /// # Errors
    /// Refuses timestamps that are not valid instants, leaving state as is.
    pub fn update_fast(&mut self, id: &str, update: FastUpdate) -> Result<Option<Event>> {
        let Some((next, fast)) = self.state.with_fast_updated(id, &update)? else {
            return Ok(None);
        };
        self.commit(next)?;
        Ok(Some(Event::FastUpdated {
            fast,
            at: Utc::now(),
        }))
    }

    /// Merge `update` into the active fast. No-op when idle.
    ///
    /// # Errors
    /// Refuses timestamps that are not valid instants, leaving state as is.
    pub fn update_active_fast(&mut self, update: ActiveFastUpdate) -> Result<Option<Event>> {
        let Some((next, active_fast)) = self.state.with_active_updated(&update)? else {
            return Ok(None);
        };
        self.commit(next)?;
        Ok(Some(Event::ActiveFastUpdated {
            active_fast,
            at: Utc::now(),
        }))
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Swap in `next` and write it out.
    ///
    /// The in-memory state is only replaced once the write succeeded, so a
    /// failed write leaves memory and storage agreeing.
    fn commit(&mut self, next: AppState) -> Result<()> {
        let payload = serde_json::to_string(&next)?;
        self.storage.write(&self.key, &payload)?;
        tracing::debug!(key = %self.key, bytes = payload.len(), "persisted state");
        self.state = Arc::new(next);
        self.revision += 1;
        Ok(())
    }
}

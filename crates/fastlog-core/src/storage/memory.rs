//! In-memory slot storage that records every write.

use std::collections::HashMap;
use std::sync::Mutex;

use super::SlotStorage;
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
    fail_writes: bool,
    fail_reads: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with `value` already present under `key`.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Storage whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Storage whose reads always fail, holding `value` under `key`.
    pub fn unreadable(key: &str, value: &str) -> Self {
        Self {
            fail_reads: true,
            ..Self::with_slot(key, value)
        }
    }

    /// Every `(key, value)` written so far, oldest first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Locked);
        }
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::QueryFailed("slot map poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::QueryFailed(format!("write to '{key}' refused")));
        }
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::QueryFailed("slot map poisoned".into()))?;
        slots.insert(key.to_string(), value.to_string());
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((key.to_string(), value.to_string()));
        }
        Ok(())
    }
}

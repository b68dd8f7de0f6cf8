//! Fast session data model.
//!
//! The serde layout is the persisted slot layout: camelCase keys, integer
//! millisecond timestamps, `activeFast` written as `null` when idle.
//!
//! Every transition here is a pure function that returns a new [`AppState`];
//! the store decides when to swap it in and persist it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A completed fasting session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fast {
    pub id: String,
    pub start_time: i64,
    pub end_time: i64,
    /// Always `end_time - start_time`, in milliseconds.
    pub duration: i64,
}

/// An in-progress fasting session. Has no end until it is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFast {
    pub id: String,
    pub start_time: i64,
}

/// The whole persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Newest-completed first.
    #[serde(default)]
    pub fasts: Vec<Fast>,
    #[serde(default)]
    pub active_fast: Option<ActiveFast>,
}

/// Partial edit of a completed fast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

/// Partial edit of the active fast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFastUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
}

/// Reject timestamps that do not map to a calendar instant.
pub fn validate_timestamp(field: &str, value: i64) -> Result<i64, ValidationError> {
    match DateTime::<Utc>::from_timestamp_millis(value) {
        Some(_) => Ok(value),
        None => Err(ValidationError::InvalidTimestamp {
            field: field.to_string(),
            value,
        }),
    }
}

fn checked_duration(start: i64, end: i64) -> Result<i64, ValidationError> {
    end.checked_sub(start)
        .ok_or(ValidationError::DurationOverflow { start, end })
}

impl Fast {
    /// Finalize an active fast at `end_time`.
    pub fn complete(active: &ActiveFast, end_time: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            id: active.id.clone(),
            start_time: active.start_time,
            end_time,
            duration: checked_duration(active.start_time, end_time)?,
        })
    }

    /// Merge `update` into a copy of this fast, recomputing `duration` from
    /// the merged times when either time was supplied.
    pub fn merged(&self, update: &FastUpdate) -> Result<Self, ValidationError> {
        let start_time = match update.start_time {
            Some(v) => validate_timestamp("startTime", v)?,
            None => self.start_time,
        };
        let end_time = match update.end_time {
            Some(v) => validate_timestamp("endTime", v)?,
            None => self.end_time,
        };
        let duration = if update.is_empty() {
            self.duration
        } else {
            checked_duration(start_time, end_time)?
        };
        Ok(Self {
            id: self.id.clone(),
            start_time,
            end_time,
            duration,
        })
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration as f64 / crate::MS_PER_HOUR as f64
    }
}

impl FastUpdate {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }
}

impl ActiveFast {
    pub fn merged(&self, update: &ActiveFastUpdate) -> Result<Self, ValidationError> {
        let start_time = match update.start_time {
            Some(v) => validate_timestamp("startTime", v)?,
            None => self.start_time,
        };
        Ok(Self {
            id: self.id.clone(),
            start_time,
        })
    }
}

impl AppState {
    /// State with `active` as the active fast, replacing any previous one.
    pub fn with_active(&self, active: ActiveFast) -> Self {
        Self {
            fasts: self.fasts.clone(),
            active_fast: Some(active),
        }
    }

    /// Finalize the active fast at `end_time` and prepend it.
    ///
    /// Returns `Ok(None)` when nothing is active.
    pub fn ended_at(&self, end_time: i64) -> Result<Option<(Self, Fast)>, ValidationError> {
        let Some(active) = self.active_fast.as_ref() else {
            return Ok(None);
        };
        let completed = Fast::complete(active, end_time)?;
        let mut fasts = Vec::with_capacity(self.fasts.len() + 1);
        fasts.push(completed.clone());
        fasts.extend(self.fasts.iter().cloned());
        Ok(Some((
            Self {
                fasts,
                active_fast: None,
            },
            completed,
        )))
    }

    /// State without the fast `id`, or `None` if it is not present.
    pub fn without_fast(&self, id: &str) -> Option<(Self, Fast)> {
        let index = self.fasts.iter().position(|f| f.id == id)?;
        let mut fasts = self.fasts.clone();
        let removed = fasts.remove(index);
        Some((
            Self {
                fasts,
                active_fast: self.active_fast.clone(),
            },
            removed,
        ))
    }

    /// State with `update` merged into fast `id`.
    ///
    /// `Ok(None)` when the id is unknown or the update carries no fields.
    pub fn with_fast_updated(
        &self,
        id: &str,
        update: &FastUpdate,
    ) -> Result<Option<(Self, Fast)>, ValidationError> {
        if update.is_empty() {
            return Ok(None);
        }
        let Some(index) = self.fasts.iter().position(|f| f.id == id) else {
            return Ok(None);
        };
        let updated = self.fasts[index].merged(update)?;
        let mut fasts = self.fasts.clone();
        fasts[index] = updated.clone();
        Ok(Some((
            Self {
                fasts,
                active_fast: self.active_fast.clone(),
            },
            updated,
        )))
    }

    /// State with `update` merged into the active fast.
    ///
    /// `Ok(None)` when nothing is active or the update carries no fields.
    pub fn with_active_updated(
        &self,
        update: &ActiveFastUpdate,
    ) -> Result<Option<(Self, ActiveFast)>, ValidationError> {
        let Some(active) = self.active_fast.as_ref() else {
            return Ok(None);
        };
        if update.start_time.is_none() {
            return Ok(None);
        }
        let updated = active.merged(update)?;
        Ok(Some((
            Self {
                fasts: self.fasts.clone(),
                active_fast: Some(updated.clone()),
            },
            updated,
        )))
    }

    pub fn find_fast(&self, id: &str) -> Option<&Fast> {
        self.fasts.iter().find(|f| f.id == id)
    }
}

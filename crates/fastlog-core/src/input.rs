//! Parsing of user-entered local date-times for edits.
//!
//! Edits are entered as `YYYY-MM-DDTHH:MM` in local time. Anything that
//! does not name exactly one real local instant is refused here, before it
//! can reach the session store.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};

use crate::error::ValidationError;
use crate::session::validate_timestamp;

const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a local `YYYY-MM-DDTHH:MM` (seconds optional) into epoch millis.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant;
/// nonexistent ones (DST spring-forward gap) are rejected.
pub fn parse_datetime_local<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    let unparseable = |message: &str| ValidationError::UnparseableDateTime {
        input: input.to_string(),
        message: message.to_string(),
    };

    let naive = INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| unparseable("expected YYYY-MM-DDTHH:MM"))?;

    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => return Err(unparseable("time does not exist in the local time zone")),
    };

    validate_timestamp("input", local.timestamp_millis())
}

/// Format epoch millis as local `YYYY-MM-DDTHH:MM`, the edit form's prefill.
pub fn to_datetime_local<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map(|utc| utc.with_timezone(tz).format("%Y-%m-%dT%H:%M").to_string())
}

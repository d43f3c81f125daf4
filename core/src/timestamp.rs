//! Conversion between the upstream's legacy `/Date(…)/` timestamps and
//! RFC3339.
//!
//! Reads return timestamps as `/Date(1365551125000+0000)/`: milliseconds
//! since the Unix epoch, optionally followed by a `±HHMM` zone offset. The
//! millisecond count is already UTC, so the offset is validated but never
//! applied. Writes and normalized records use RFC3339 in UTC.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::error::MalformedTimestamp;

const PREFIX: &str = "/Date(";
const SUFFIX: &str = ")/";

/// The "beginning of time" sentinel: `0001-01-01T00:00:00Z`.
///
/// Passing it to `find_modified_since` means "no lower bound", and the
/// `If-Modified-Since` header is left out.
pub static DAY_ZERO: LazyLock<DateTime<Utc>> = LazyLock::new(|| {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
});

/// Convert a legacy timestamp to an RFC3339 UTC string.
///
/// Empty input passes through unchanged. Values that are already RFC3339
/// are re-emitted in canonical UTC form, so converting twice is a no-op.
/// `_date_only` marks calendar-date fields; the output is a full RFC3339
/// timestamp either way.
pub fn to_interchange(raw: &str, _date_only: bool) -> Result<String, MalformedTimestamp> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(format_utc(&parsed.with_timezone(&Utc)));
    }
    let millis = parse_legacy(raw)?;
    let instant = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| MalformedTimestamp::new(raw, "offset out of range"))?;
    Ok(format_utc(&instant))
}

/// Convert an RFC3339 string back to the legacy wire form.
///
/// Date-only fields are written without a zone suffix; date-time fields
/// carry `+0000`.
pub fn from_interchange(value: &str, date_only: bool) -> Result<String, MalformedTimestamp> {
    if value.is_empty() {
        return Ok(String::new());
    }
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|_| MalformedTimestamp::new(value, "not an RFC3339 timestamp"))?;
    let millis = parsed.timestamp_millis();
    if date_only {
        Ok(format!("{PREFIX}{millis}{SUFFIX}"))
    } else {
        Ok(format!("{PREFIX}{millis}+0000{SUFFIX}"))
    }
}

/// Format an `If-Modified-Since` value, or `None` for `DAY_ZERO`.
pub fn if_modified_since(since: &DateTime<Utc>) -> Option<String> {
    if *since == *DAY_ZERO {
        None
    } else {
        Some(format_utc(since))
    }
}

fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Extract the millisecond payload from `/Date(<ms>[±HHMM])/`.
fn parse_legacy(raw: &str) -> Result<i64, MalformedTimestamp> {
    let inner = raw
        .strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_suffix(SUFFIX))
        .ok_or_else(|| MalformedTimestamp::new(raw, "missing /Date( wrapper"))?;

    // A leading '-' belongs to the millisecond count, not the offset.
    let split = inner
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '+' || *c == '-')
        .map(|(i, _)| i);
    let (digits, offset) = match split {
        Some(i) => (&inner[..i], Some(&inner[i + 1..])),
        None => (inner, None),
    };

    if let Some(offset) = offset {
        if offset.len() != 4 || !offset.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedTimestamp::new(raw, "zone offset must be four digits"));
        }
    }
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() {
        return Err(MalformedTimestamp::new(raw, "missing numeric payload"));
    }
    if !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedTimestamp::new(raw, "non-numeric offset"));
    }
    digits
        .parse::<i64>()
        .map_err(|_| MalformedTimestamp::new(raw, "non-numeric offset"))
}

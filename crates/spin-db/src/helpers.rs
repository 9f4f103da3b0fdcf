//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and the timestamp format
//! shared by all writes.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Render a timestamp the way every write stores it.
///
/// Fixed microsecond precision and a `Z` suffix keep string order equal to
/// chronological order, which the `spun_at` range queries rely on.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// `CURRENT_TIMESTAMP` format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as a bool. Any non-zero value is `true`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Treat blank notes as absent so they are stored as NULL.
#[must_use]
pub fn normalize_notes(notes: Option<&str>) -> Option<&str> {
    notes.filter(|n| !n.trim().is_empty())
}

//! CLI command modules.

pub mod budget;
pub mod config;
pub mod event;
pub mod optimize;
pub mod recovery;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a timestamp: RFC 3339, or `YYYY-MM-DDTHH:MM` / `YYYY-MM-DD HH:MM`
/// interpreted as UTC.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(t.and_utc());
        }
    }
    Err(format!(
        "unrecognized timestamp '{raw}' (expected RFC 3339 or YYYY-MM-DDTHH:MM)"
    ))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("unrecognized date '{raw}' (expected YYYY-MM-DD)"))
}

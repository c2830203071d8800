//! Date parsing for store date values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a date start into a UTC calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 datetimes (converted to UTC first), and
/// offset-less datetimes (taken as UTC).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.date())
}

/// Display form used on the site, e.g. `March 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

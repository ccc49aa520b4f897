//! Calendar date rules shared by the append and query operations.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Parses a client-supplied date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. A timestamp keeps only its
/// calendar date in its own offset.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<Date> {
    let value = value.trim();
    if let Ok(date) = Date::parse(value, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    OffsetDateTime::parse(value, &Rfc3339).ok().map(OffsetDateTime::date)
}

/// Formats a date the way the API reports it, e.g. `Mon Jan 02 2006`.
///
/// # Errors
/// Returns an error if the date cannot be rendered with the readable layout.
pub fn format_readable(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[weekday repr:short] [month repr:short] [day] [year]"))
}

/// The server's current date, used when an entry arrives without one.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

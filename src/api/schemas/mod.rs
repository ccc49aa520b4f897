pub mod exercise;
pub mod health;
pub mod users;

use crate::domain::date::format_readable;
use crate::error::{AppError, Result};
use time::Date;
use uuid::Uuid;

/// Resolves a client-supplied user id. An id that cannot name any user is
/// reported the same way as an id with no user behind it.
pub(crate) fn parse_user_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound)
}

pub(crate) fn readable_date(date: Date) -> Result<String> {
    format_readable(date).map_err(|e| {
        tracing::error!(error = %e, %date, "Failed to format date");
        AppError::Internal
    })
}

/// Treats empty strings the way the landing page's forms send absent fields.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads a required text field. Surrounding whitespace is dropped and NUL
/// characters are refused, since Postgres cannot store them in `TEXT`.
pub(crate) fn required_text(value: Option<String>, field: &str) -> std::result::Result<String, String> {
    let value = non_empty(value).ok_or_else(|| format!("{field} is required"))?;
    if value.contains('\0') {
        return Err(format!("{field} is invalid"));
    }
    Ok(value.trim().to_string())
}

//! String formatting utilities for UI rendering.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a short ID from a UUID (first 8 characters).
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Format a datetime for display.
///
/// Pretty output uses the medium date in `tz`; plain output is RFC 3339.
pub fn format_datetime<Tz>(dt: &DateTime<Utc>, tz: &Tz, pretty: bool) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if pretty {
        dt.with_timezone(tz).format("%b %-d, %Y").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Price with two decimals, e.g. "$24.99".
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

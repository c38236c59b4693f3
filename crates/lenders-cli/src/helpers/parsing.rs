//! Parsing helpers for dates, tags and item enums.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use lenders_core::tags::split_tag_input;
use lenders_core::{ItemType, StatusFilter, WishlistPriority};

use crate::errors::CliError;

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
///
/// A bare date means the start of that day in `tz`.
pub fn parse_datetime(value: &str, tz: &Tz) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let local = date
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
            .ok_or_else(|| CliError::invalid_input(format!("Invalid date value: {}", value)))?;
        return Ok(local.with_timezone(&Utc));
    }

    Err(CliError::invalid_input(format!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
    .into())
}

pub fn parse_item_type(value: &str) -> anyhow::Result<ItemType> {
    Ok(value.parse::<ItemType>()?)
}

pub fn parse_priority(value: &str) -> anyhow::Result<WishlistPriority> {
    Ok(value.parse::<WishlistPriority>()?)
}

pub fn parse_status(value: &str) -> anyhow::Result<StatusFilter> {
    Ok(value.parse::<StatusFilter>()?)
}

/// Flatten repeated `--tag` flags, each of which may hold a comma list.
pub fn parse_tags(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| split_tag_input(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_rfc3339() {
        let dt = parse_datetime("2025-08-05T10:30:00+02:00", &Tz::UTC).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 8, 5, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date_in_zone() {
        let dt = parse_datetime("2025-08-05", &Tz::UTC).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 8, 5, 0, 0, 0).unwrap());

        let dt = parse_datetime("2025-01-15", &chrono_tz::America::New_York).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 15, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("next tuesday", &Tz::UTC).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(parse_item_type("Borrowed").unwrap(), ItemType::Borrowed);
        assert!(parse_item_type("stolen").is_err());
        assert_eq!(parse_priority("high").unwrap(), WishlistPriority::High);
        assert_eq!(parse_status("overdue").unwrap(), StatusFilter::Overdue);
    }

    #[test]
    fn test_parse_tags_splits_commas() {
        let tags = parse_tags(&["tools, outdoor".to_string(), "garden".to_string()]);
        assert_eq!(tags, vec!["tools", "outdoor", "garden"]);
    }
}

//! Tag normalization.

use std::collections::HashSet;

use crate::error::{LedgerError, Result};

/// Maximum bytes per tag.
pub const MAX_TAG_BYTES: usize = 64;

/// Maximum tags per item.
pub const MAX_TAGS_PER_ITEM: usize = 32;

/// Normalize and validate a tag list before storage.
///
/// - Trims whitespace and lowercases
/// - Removes duplicates, keeping the first occurrence
/// - Rejects empty tags, commas and control characters
/// - Enforces length limits
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(tags.len());
    let mut normalized = Vec::with_capacity(tags.len());

    for tag in tags {
        let tag = normalize_tag(tag.as_ref())?;
        if seen.insert(tag.clone()) {
            normalized.push(tag);
        }
    }

    if normalized.len() > MAX_TAGS_PER_ITEM {
        return Err(LedgerError::Validation(format!(
            "Too many tags (max {})",
            MAX_TAGS_PER_ITEM
        )));
    }
    Ok(normalized)
}

/// Normalize a single tag (also used for tag lookups).
pub fn normalize_tag(tag: &str) -> Result<String> {
    let trimmed = tag.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation("Empty tag is not allowed".to_string()));
    }
    if trimmed.len() > MAX_TAG_BYTES {
        return Err(LedgerError::Validation(format!(
            "Tag too long (max {} bytes)",
            MAX_TAG_BYTES
        )));
    }
    if trimmed.chars().any(|c| c.is_control() || c == ',') {
        return Err(LedgerError::Validation(format!(
            "Tag contains invalid characters: {:?}",
            trimmed
        )));
    }
    Ok(trimmed)
}

/// Split a comma-separated tag string, the way tags are typed into a form.
pub fn split_tag_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

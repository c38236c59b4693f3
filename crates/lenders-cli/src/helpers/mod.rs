//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Reading transfer text, photos and confirmations (`input`)
//! - Datetime, tag and enum parsing (`parsing`)
//! - Resolving item IDs from full UUIDs or prefixes (`ids`)

mod ids;
mod input;
mod parsing;

pub use ids::{resolve_item_id, resolve_item_ids, resolve_wishlist_id, resolve_wishlist_ids};
pub use input::{confirm, read_image, read_transfer_text};
pub use parsing::{parse_datetime, parse_item_type, parse_priority, parse_status, parse_tags};

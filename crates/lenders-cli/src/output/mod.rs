//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying ledger and
//! wishlist items in various formats (JSON, table, plain text).

mod json;
mod text;

pub use json::{item_json, items_json, stats_json, wishlist_item_json, wishlist_items_json};
pub use text::{print_item, print_item_list, print_wishlist_item, print_wishlist_list};

//! UI primitives for the lenders CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles, symbols
//! - **Render**: Tables, headers, receipts, hints, formatted text
//! - **Format**: String utilities (truncate, wrap, align)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, OutputMode, Badge};
//! use crate::ui::render::{header, table, badge, hint};
//!
//! let ctx = UiContext::from_env(args.json, args.format.as_deref(), cli.no_color, cli.ascii);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "list", Some("Tag: tools")));
//! println!("{}", simple_table(&ctx, &columns, &rows));
//! println!("{}", hint(&ctx, "lenders show <id>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::{parse_output_format, OutputMode};
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, receipt, simple_table,
    table, Column,
};

pub use format::{format_datetime, format_price, short_id, single_line, truncate};

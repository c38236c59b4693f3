//! Application-level utilities for the lenders CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and ledger files
//! - The open ledger session (load, sweep, save)

mod context;
mod resolver;
mod session;

pub use context::AppContext;
pub use resolver::resolve_config_path;
pub use session::LedgerSession;

//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, ledger, item).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or a rejected mutation.
    pub const INVALID_INPUT: i32 = 4;

    /// Transfer text could not be decoded.
    pub const MALFORMED_TRANSFER: i32 = 5;

    /// Remote store or calendar failure.
    pub const REMOTE_FAILED: i32 = 6;
}

/// Number of tags shown under "Popular tags" on the dashboard.
pub const POPULAR_TAG_LIMIT: usize = 10;

/// Number of items shown under "Recent activity" on the dashboard.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

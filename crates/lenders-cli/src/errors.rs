//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use lenders_core::LedgerError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, ledger, item)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\nHint: {}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a core error.
pub fn ledger_exit_code(err: &LedgerError) -> i32 {
    match err {
        LedgerError::NotFound(_) => exit_codes::NOT_FOUND,
        LedgerError::Validation(_) => exit_codes::INVALID_INPUT,
        LedgerError::MalformedTransferRecord(_) => exit_codes::MALFORMED_TRANSFER,
        LedgerError::RemoteOperationFailure(_) => exit_codes::REMOTE_FAILED,
        LedgerError::Storage(_) | LedgerError::Serialization(_) => exit_codes::FAILURE,
    }
}

/// Exit code for any error surfaced by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(ledger) = err.downcast_ref::<LedgerError>() {
        return ledger_exit_code(ledger);
    }
    exit_codes::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_carries_hint() {
        let err = CliError::not_found("No ledger at /tmp/x", "Run `lenders init`");
        assert_eq!(err.to_string(), "No ledger at /tmp/x\nHint: Run `lenders init`");
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_exit_code_for_core_errors() {
        let err = anyhow::Error::new(LedgerError::MalformedTransferRecord("bad".into()));
        assert_eq!(exit_code_for(&err), exit_codes::MALFORMED_TRANSFER);

        let err = anyhow::Error::new(LedgerError::Validation("Name is required".into()));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);

        let err = anyhow::Error::new(LedgerError::RemoteOperationFailure("down".into()));
        assert_eq!(exit_code_for(&err), exit_codes::REMOTE_FAILED);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exit_codes::FAILURE);

        let err = anyhow::Error::new(CliError::invalid_input("bad id"));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }
}

//! Path resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::config::default_config_path;

/// Resolve the config file path, checking LENDERS_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("LENDERS_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Error message when the ledger file is missing.
pub fn missing_ledger_message(path: &Path) -> String {
    format!("No ledger found at {}", path.display())
}

/// Error message when the config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No config found at {}", config_path.display())
}

/// Hint shown with either message.
pub const INIT_HINT: &str =
    "Run `lenders init`, or point at a ledger with LENDERS_PATH=/path/to/ledger.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let path = Path::new("/tmp/lenders/ledger.json");
        assert_eq!(
            missing_ledger_message(path),
            "No ledger found at /tmp/lenders/ledger.json"
        );
        assert!(missing_config_message(Path::new("/tmp/c.toml")).contains("/tmp/c.toml"));
    }
}

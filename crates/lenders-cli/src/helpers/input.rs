//! Input handling helpers: transfer text, photos and confirmations.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Confirm;

use crate::errors::CliError;
use crate::ui::UiContext;

/// Read transfer text from the argument or from stdin.
pub fn read_transfer_text(text: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = text {
        if value.trim().is_empty() {
            return Err(CliError::invalid_input("Transfer text cannot be empty").into());
        }
        return Ok(value.trim().to_string());
    }

    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No transfer text given; pass it as an argument or pipe it via stdin",
        )
        .into());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    let trimmed = buffer.trim().to_string();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("No input provided on stdin").into());
    }
    Ok(trimmed)
}

/// Read a photo file. The bytes are stored as-is.
pub fn read_image(path: &str) -> anyhow::Result<Vec<u8>> {
    let path = Path::new(path);
    std::fs::read(path).map_err(|e| {
        CliError::invalid_input(format!("Failed to read image {}: {}", path.display(), e)).into()
    })
}

/// Ask a yes/no question, defaulting to no.
///
/// Without a terminal there is nobody to ask, so the caller must pass a
/// `--force`/`--yes` flag instead.
pub fn confirm(ui: &UiContext, prompt: &str, skip_flag: &str) -> anyhow::Result<bool> {
    if !ui.is_interactive() {
        return Err(CliError::invalid_input(format!(
            "Confirmation required; rerun with {}",
            skip_flag
        ))
        .into());
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

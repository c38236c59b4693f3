//! Output mode routing logic.

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON output only
    Json,
    /// Plain text, stable for logs and scripts
    #[default]
    Plain,
    /// Human-friendly with colors and formatting (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules:
    /// 1. `--json` overrides everything
    /// 2. `--format plain` forces plain
    /// 3. `TERM=dumb` forces plain
    /// 4. Pretty only when stdout is a TTY
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Value of a `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Validate `--format`, rejecting it alongside `--json`.
pub fn parse_output_format(value: Option<&str>, json: bool) -> anyhow::Result<Option<OutputFormat>> {
    let format = match value {
        None => None,
        Some("table") => Some(OutputFormat::Table),
        Some("plain") => Some(OutputFormat::Plain),
        Some(other) => {
            return Err(anyhow::anyhow!(
                "Unsupported format: {} (use table or plain)",
                other
            ))
        }
    };
    if json && format.is_some() {
        return Err(anyhow::anyhow!("--format cannot be used with --json"));
    }
    Ok(format)
}

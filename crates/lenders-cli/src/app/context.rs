//! Application context for the lenders CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use chrono::Duration;
use chrono_tz::Tz;
use once_cell::unsync::OnceCell;

use lenders_core::DEFAULT_RETENTION_DAYS;

use crate::cli::Cli;
use crate::config::{default_calendar_path, default_remote_path, read_config, LendersConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_config_message, resolve_config_path, INIT_HINT};
use super::session::LedgerSession;

/// Application context that bundles CLI args with configuration.
///
/// The config file is optional when `--ledger` is given; every setting
/// then falls back to its default.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<LendersConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&LendersConfig>> {
        let config = self.config.get_or_try_init(|| -> anyhow::Result<_> {
            let path = resolve_config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file");
                return Ok(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Resolve the ledger file from `--ledger`/`LENDERS_PATH`, then config.
    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.ledger.as_ref() {
            return Ok(PathBuf::from(path));
        }
        match self.config()? {
            Some(config) => Ok(PathBuf::from(&config.ledger.path)),
            None => {
                let config_path = resolve_config_path()?;
                Err(CliError::not_found(missing_config_message(&config_path), INIT_HINT).into())
            }
        }
    }

    /// Archive retention, or `None` when the sweep is disabled.
    pub fn retention(&self) -> anyhow::Result<Option<Duration>> {
        let days = self
            .config()?
            .map(|config| i64::from(config.archive.retention_days))
            .unwrap_or(DEFAULT_RETENTION_DAYS);
        Ok((days > 0).then(|| Duration::days(days)))
    }

    /// Display and reminder time zone: config, then `TZ`, then UTC.
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        let configured = self
            .config()?
            .and_then(|config| config.ui.timezone.clone());
        if let Some(name) = configured {
            return name.parse::<Tz>().map_err(|_| {
                CliError::invalid_input(format!("Unknown timezone in config: {}", name)).into()
            });
        }
        Ok(std::env::var("TZ")
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(Tz::UTC))
    }

    /// Remote store directory: flag, then config, then the data dir.
    pub fn remote_root(&self, flag: Option<&str>) -> anyhow::Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(PathBuf::from(path));
        }
        match self.config()?.and_then(|config| config.remote.path.as_ref()) {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_remote_path(),
        }
    }

    /// Reminder directory: flag, then config, then the data dir.
    pub fn calendar_dir(&self, flag: Option<&str>) -> anyhow::Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(PathBuf::from(path));
        }
        match self.config()?.and_then(|config| config.calendar.path.as_ref()) {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_calendar_path(),
        }
    }

    /// Load the ledger and run the retention sweep.
    pub fn open_ledger(&self) -> anyhow::Result<LedgerSession> {
        let path = self.ledger_path()?;
        LedgerSession::open(path, self.retention()?)
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }
}

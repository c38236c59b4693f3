//! `lenders init`: write the config and create an empty ledger.

use std::path::PathBuf;

use chrono_tz::Tz;

use lenders_core::{save_snapshot, LedgerStore, DEFAULT_RETENTION_DAYS};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_ledger_path, write_config, LendersConfig};
use crate::errors::CliError;
use crate::ui::{blank_line, hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Use --force to overwrite it",
            config_path.display()
        ))
        .into());
    }

    if let Some(name) = args.timezone.as_deref() {
        name.parse::<Tz>()
            .map_err(|_| CliError::invalid_input(format!("Unknown timezone: {}", name)))?;
    }

    let ledger_path = match args.path.as_ref().or(ctx.cli().ledger.as_ref()) {
        Some(path) => PathBuf::from(path),
        None => default_ledger_path()?,
    };

    // an existing ledger is kept so re-running init never loses items
    let created = if ledger_path.exists() {
        tracing::info!(path = %ledger_path.display(), "keeping existing ledger");
        false
    } else {
        save_snapshot(&ledger_path, &LedgerStore::new().snapshot())?;
        true
    };

    let config = LendersConfig::new(
        ledger_path.clone(),
        args.retention_days.unwrap_or(DEFAULT_RETENTION_DAYS as u32),
        args.remote.as_ref().map(PathBuf::from),
        args.calendar.as_ref().map(PathBuf::from),
        args.timezone.clone(),
    );
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let ledger_display = ledger_path.display().to_string();
        let config_display = config_path.display().to_string();
        let retention = config.archive.retention_days.to_string();
        let title = if created {
            "Initialized ledger"
        } else {
            "Reused existing ledger"
        };
        print(
            &ui,
            &receipt(
                &ui,
                title,
                &[
                    ("Ledger", ledger_display.as_str()),
                    ("Config", config_display.as_str()),
                    ("Retention Days", retention.as_str()),
                ],
            ),
        );
        if ui.mode.is_pretty() {
            blank_line(&ui);
            print(&ui, &hint(&ui, "lenders add lent \"The Hobbit\" Alex"));
        }
    }
    Ok(())
}

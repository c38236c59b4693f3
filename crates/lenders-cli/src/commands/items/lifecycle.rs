//! Archive, recover, delete and purge.

use chrono::Duration;

use crate::app::AppContext;
use crate::cli::{ArchiveArgs, DeleteArgs, PurgeArgs, RecoverArgs};
use crate::errors::CliError;
use crate::helpers::{confirm, resolve_item_id, resolve_item_ids};
use crate::ui::{badge, print, short_id, Badge, OutputMode};

pub fn handle_archive(ctx: &AppContext, args: &ArchiveArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let ids = resolve_item_ids(session.store(), &args.ids)?;
    let archived = session.store_mut().archive_items(&ids);
    session.save()?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let skipped = ids.len() - archived.len();
        match ui.mode {
            OutputMode::Pretty => {
                let mut message = format!("Archived {} item(s)", archived.len());
                if skipped > 0 {
                    message.push_str(&format!(", {} already archived", skipped));
                }
                let kind = if archived.is_empty() { Badge::Warn } else { Badge::Ok };
                print(&ui, &badge(&ui, kind, &message));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("archived={}", archived.len());
                for id in &archived {
                    println!("item_id={}", id);
                }
            }
        }
    }
    Ok(())
}

pub fn handle_recover(ctx: &AppContext, args: &RecoverArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let id = resolve_item_id(session.store(), &args.id)?;
    if !session.store_mut().recover_item(&id) {
        return Err(CliError::invalid_input(format!(
            "Item {} is not archived",
            short_id(&id)
        ))
        .into());
    }
    session.save()?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match ui.mode {
            OutputMode::Pretty => {
                print(
                    &ui,
                    &badge(&ui, Badge::Ok, &format!("Recovered item {}", short_id(&id))),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("item_id={}", id);
            }
        }
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let ids = resolve_item_ids(session.store(), &args.ids)?;
    let ui = ctx.ui_context(false, None);

    if !args.force {
        let prompt = match ids.as_slice() {
            [id] => {
                let name = session
                    .store()
                    .item(id)
                    .map(|item| item.name.clone())
                    .unwrap_or_default();
                format!("Permanently delete \"{}\"? This cannot be undone", name)
            }
            _ => format!(
                "Permanently delete {} items? This cannot be undone",
                ids.len()
            ),
        };
        if !confirm(&ui, &prompt, "--force")? {
            if !ctx.quiet() {
                match ui.mode {
                    OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Cancelled")),
                    OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
                }
            }
            return Ok(());
        }
    }

    let removed = session.store_mut().permanently_delete_items(&ids);
    session.save()?;

    if !ctx.quiet() {
        match ui.mode {
            OutputMode::Pretty => {
                print(
                    &ui,
                    &badge(&ui, Badge::Ok, &format!("Deleted {} item(s)", removed.len())),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("deleted={}", removed.len());
            }
        }
    }
    Ok(())
}

/// Run the retention sweep now, optionally with a different period.
pub fn handle_purge(ctx: &AppContext, args: &PurgeArgs) -> anyhow::Result<()> {
    let retention = match args.days {
        Some(days) => Duration::days(i64::from(days)),
        None => ctx.retention()?.ok_or_else(|| {
            CliError::invalid_input(
                "Archive retention is disabled\nHint: Pass --days to purge anyway",
            )
        })?,
    };

    let mut session = ctx.open_ledger()?;
    let swept_on_open = session.purged_on_open();
    let purged = session.store_mut().purge_expired_archives(retention);
    session.save()?;
    let total = swept_on_open + purged.len();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "purged": total,
                "retention_days": retention.num_days(),
            }))?
        );
        return Ok(());
    }
    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match ui.mode {
            OutputMode::Pretty => {
                let message = format!(
                    "Purged {} item(s) archived {} or more days ago",
                    total,
                    retention.num_days()
                );
                print(&ui, &badge(&ui, Badge::Ok, &message));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("purged={}", total);
            }
        }
    }
    Ok(())
}

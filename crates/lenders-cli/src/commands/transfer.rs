//! `lenders share` and `lenders import`: the item hand-off codec.

use lenders_core::transfer::encode;
use lenders_core::{LedgerError, TransferRecord};

use crate::app::AppContext;
use crate::cli::{ImportArgs, ShareArgs};
use crate::helpers::{confirm, read_transfer_text, resolve_item_id};
use crate::output::item_json;
use crate::ui::{badge, print, short_id, Badge, OutputMode};

/// Print the transfer text for one item. Photos are never included.
pub fn handle_share(ctx: &AppContext, args: &ShareArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let store = session.store();
    let id = resolve_item_id(store, &args.id)?;
    let item = store.item(&id).ok_or_else(|| LedgerError::not_found_item(&id))?;

    println!("{}", encode(item)?);
    Ok(())
}

/// Decode transfer text and add it as a new item with a fresh ID.
pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let text = read_transfer_text(args.text.as_deref())?;
    let record = TransferRecord::parse(&text)?;
    let ui = ctx.ui_context(false, None);

    if !args.yes {
        let prompt = format!(
            "Accept {} \"{}\" ({})?",
            record.item_type.as_str().to_lowercase(),
            record.name,
            record.person
        );
        if !confirm(&ui, &prompt, "--yes")? {
            if !ctx.quiet() {
                match ui.mode {
                    OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Cancelled")),
                    OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
                }
            }
            return Ok(());
        }
    }

    let mut session = ctx.open_ledger()?;
    let id = session.store_mut().add_item(record.into_new_item())?;
    session.save()?;

    let store = session.store();
    let item = store.item(&id).ok_or_else(|| LedgerError::not_found_item(&id))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&item_json(item, store.now()))?);
        return Ok(());
    }
    if !ctx.quiet() {
        match ui.mode {
            OutputMode::Pretty => {
                let message = format!(
                    "Accepted \"{}\" ({}) as {}",
                    item.name,
                    item.counterparty_label(),
                    short_id(&id)
                );
                print(&ui, &badge(&ui, Badge::Ok, &message));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("item_id={}", id);
                println!("type={}", item.item_type);
            }
        }
    }
    Ok(())
}

use lenders_core::LedgerItemUpdate;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{parse_datetime, parse_item_type, parse_tags, read_image, resolve_item_id};
use crate::ui::{badge, print, short_id, Badge, OutputMode};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let tz = ctx.timezone()?;
    let id = resolve_item_id(session.store(), &args.id)?;

    let mut update = LedgerItemUpdate::new();
    if let Some(ref name) = args.name {
        update = update.name(name);
    }
    if let Some(ref person) = args.person {
        update = update.person(person);
    }
    if let Some(ref item_type) = args.item_type {
        update = update.item_type(parse_item_type(item_type)?);
    }
    if args.clear_due {
        update = update.return_by_date(None);
    } else if let Some(ref due) = args.due {
        update = update.return_by_date(Some(parse_datetime(due, &tz)?));
    }
    if args.clear_notes {
        update = update.condition_notes(None);
    } else if let Some(ref notes) = args.notes {
        update = update.condition_notes(Some(notes.clone()));
    }
    if args.clear_image {
        update = update.image_data(None);
    } else if let Some(ref path) = args.image {
        update = update.image_data(Some(read_image(path)?));
    }
    if args.clear_tags {
        update = update.tags(Vec::<String>::new());
    } else if !args.tag.is_empty() {
        update = update.tags(parse_tags(&args.tag));
    }

    if update.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass at least one field, e.g. --name or --due",
        )
        .into());
    }

    session.store_mut().update_item(&id, update)?;
    session.save()?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match ui.mode {
            OutputMode::Pretty => {
                print(
                    &ui,
                    &badge(&ui, Badge::Ok, &format!("Updated item {}", short_id(&id))),
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

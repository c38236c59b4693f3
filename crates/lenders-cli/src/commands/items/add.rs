use lenders_core::{LedgerError, NewLedgerItem};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{parse_datetime, parse_item_type, parse_tags, read_image};
use crate::output::item_json;
use crate::ui::theme::{styled, styles, DOT};
use crate::ui::{badge, blank_line, format_datetime, hint, print, short_id, Badge, OutputMode};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let tz = ctx.timezone()?;
    let item_type = parse_item_type(&args.item_type)?;

    let mut new_item = NewLedgerItem::new(&args.name, &args.person, item_type)
        .with_tags(parse_tags(&args.tag));
    if let Some(ref due) = args.due {
        new_item = new_item.with_return_by_date(parse_datetime(due, &tz)?);
    }
    if let Some(ref notes) = args.notes {
        new_item = new_item.with_condition_notes(notes);
    }
    if let Some(ref path) = args.image {
        new_item = new_item.with_image_data(read_image(path)?);
    }
    if let Some(ref date) = args.date {
        new_item = new_item.with_date(parse_datetime(date, &tz)?);
    }

    let id = session.store_mut().add_item(new_item)?;
    session.save()?;

    let store = session.store();
    let item = store.item(&id).ok_or_else(|| LedgerError::not_found_item(&id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&item_json(item, store.now()))?);
        return Ok(());
    }
    if ctx.quiet() {
        return Ok(());
    }

    let ui = ctx.ui_context(false, None);
    match ui.mode {
        OutputMode::Pretty => {
            print(
                &ui,
                &badge(
                    &ui,
                    Badge::Ok,
                    &format!("Added \"{}\" ({})", item.name, item.counterparty_label()),
                ),
            );
            let dot = DOT.get(ui.unicode);
            let mut context = format!(
                "ID: {}  {}  {}  {}  tags: {}",
                short_id(&id),
                dot,
                item.item_type,
                dot,
                item.tags.len()
            );
            if let Some(ref due) = item.return_by_date {
                context.push_str(&format!("  {}  due {}", dot, format_datetime(due, &tz, true)));
            }
            println!("{}", styled(&context, styles::dim(), ui.color));
            blank_line(&ui);
            print(
                &ui,
                &hint(
                    &ui,
                    &format!(
                        "lenders show {}  {}  lenders share {}",
                        short_id(&id),
                        dot,
                        short_id(&id)
                    ),
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("item_id={}", id);
            println!("type={}", item.item_type);
            println!("date={}", item.date.to_rfc3339());
            println!("tag_count={}", item.tags.len());
        }
    }
    Ok(())
}

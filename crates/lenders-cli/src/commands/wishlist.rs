//! `lenders wishlist` subcommands.

use lenders_core::query::search_wishlist;
use lenders_core::{LedgerError, NewWishlistItem, WishlistItem, WishlistItemUpdate};

use crate::app::AppContext;
use crate::cli::{
    WishlistAddArgs, WishlistDeleteArgs, WishlistEditArgs, WishlistListArgs, WishlistShowArgs,
};
use crate::errors::CliError;
use crate::helpers::{confirm, parse_priority, parse_tags, resolve_wishlist_id, resolve_wishlist_ids};
use crate::output::{print_wishlist_item, print_wishlist_list, wishlist_item_json, wishlist_items_json};
use crate::ui::{badge, parse_output_format, print, short_id, Badge, OutputMode};

pub fn handle_add(ctx: &AppContext, args: &WishlistAddArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;

    let mut new_item = NewWishlistItem::new(&args.name).with_tags(parse_tags(&args.tag));
    if let Some(ref description) = args.description {
        new_item = new_item.with_description(description);
    }
    if let Some(price) = args.price {
        new_item = new_item.with_estimated_price(price);
    }
    if let Some(ref priority) = args.priority {
        new_item = new_item.with_priority(parse_priority(priority)?);
    }

    let id = session.store_mut().add_wishlist_item(new_item)?;
    session.save()?;

    let item = session
        .store()
        .wishlist_item(&id)
        .ok_or_else(|| LedgerError::not_found_wishlist(&id))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&wishlist_item_json(item))?);
        return Ok(());
    }
    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match ui.mode {
            OutputMode::Pretty => {
                let message = format!("Added \"{}\" to wishlist ({})", item.name, short_id(&id));
                print(&ui, &badge(&ui, Badge::Ok, &message));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("wishlist_id={}", id);
                println!("priority={}", item.priority);
            }
        }
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &WishlistListArgs) -> anyhow::Result<()> {
    parse_output_format(args.format.as_deref(), args.json)?;
    let session = ctx.open_ledger()?;
    let all = session.store().wishlist_items();
    let items: Vec<&WishlistItem> = match args.search.as_deref() {
        Some(q) => search_wishlist(all, q.trim()),
        None => all.iter().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&wishlist_items_json(&items))?);
        return Ok(());
    }

    let ui = ctx.ui_context(false, args.format.as_deref());
    print_wishlist_list(&ui, &items, &ctx.timezone()?, ctx.quiet());
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &WishlistShowArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let id = resolve_wishlist_id(session.store(), &args.id)?;
    let item = session
        .store()
        .wishlist_item(&id)
        .ok_or_else(|| LedgerError::not_found_wishlist(&id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&wishlist_item_json(item))?);
        return Ok(());
    }
    let ui = ctx.ui_context(false, None);
    print_wishlist_item(&ui, item, &ctx.timezone()?);
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &WishlistEditArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let id = resolve_wishlist_id(session.store(), &args.id)?;

    let mut update = WishlistItemUpdate::new();
    if let Some(ref name) = args.name {
        update = update.name(name);
    }
    if args.clear_description {
        update = update.description(None);
    } else if let Some(ref description) = args.description {
        update = update.description(Some(description.clone()));
    }
    if args.clear_price {
        update = update.estimated_price(None);
    } else if let Some(price) = args.price {
        update = update.estimated_price(Some(price));
    }
    if let Some(ref priority) = args.priority {
        update = update.priority(parse_priority(priority)?);
    }
    if args.clear_tags {
        update = update.tags(Vec::<String>::new());
    } else if !args.tag.is_empty() {
        update = update.tags(parse_tags(&args.tag));
    }

    if update.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass at least one field, e.g. --price or --priority",
        )
        .into());
    }

    session.store_mut().update_wishlist_item(&id, update)?;
    session.save()?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match ui.mode {
            OutputMode::Pretty => {
                let message = format!("Updated wishlist item {}", short_id(&id));
                print(&ui, &badge(&ui, Badge::Ok, &message));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("wishlist_id={}", id);
            }
        }
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &WishlistDeleteArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let ids = resolve_wishlist_ids(session.store(), &args.ids)?;
    let ui = ctx.ui_context(false, None);

    if !args.force {
        let prompt = format!("Delete {} wishlist item(s)?", ids.len());
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

    let removed = session.store_mut().delete_wishlist_items(&ids);
    session.save()?;

    if !ctx.quiet() {
        match ui.mode {
            OutputMode::Pretty => {
                let message = format!("Deleted {} wishlist item(s)", removed.len());
                print(&ui, &badge(&ui, Badge::Ok, &message));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("deleted={}", removed.len());
            }
        }
    }
    Ok(())
}

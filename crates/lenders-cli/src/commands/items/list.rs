use lenders_core::query::{self, ItemFilter};
use lenders_core::LedgerItem;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::{parse_item_type, parse_status};
use crate::output::{items_json, print_item_list};
use crate::ui::parse_output_format;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    parse_output_format(args.format.as_deref(), args.json)?;
    let session = ctx.open_ledger()?;
    let store = session.store();
    let now = store.now();

    let filter = if let Some(ref t) = args.item_type {
        Some(ItemFilter::Type(parse_item_type(t)?))
    } else if let Some(ref tag) = args.tag {
        Some(ItemFilter::Tag(tag.clone()))
    } else if let Some(ref status) = args.status {
        Some(ItemFilter::Status(parse_status(status)?))
    } else {
        None
    };

    let mut items: Vec<&LedgerItem> = if args.archived {
        store.archived_items()
    } else if let Some(ref f) = filter {
        f.apply(store.items(), now)
    } else {
        query::active_items(store.items())
    };
    if let Some(ref q) = args.search {
        items = query::search(items, q.trim());
    }
    if let Some(limit) = args.limit {
        items.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items_json(&items, now))?);
        return Ok(());
    }

    let mut context = Vec::new();
    if args.archived {
        context.push("Archive".to_string());
    }
    if let Some(ref f) = filter {
        context.push(f.description());
    }
    if let Some(ref q) = args.search {
        context.push(format!("Search: {}", q.trim()));
    }
    let context = (!context.is_empty()).then(|| context.join(", "));

    let ui = ctx.ui_context(false, args.format.as_deref());
    print_item_list(
        &ui,
        &items,
        &ctx.timezone()?,
        now,
        context.as_deref(),
        ctx.quiet(),
    );
    Ok(())
}

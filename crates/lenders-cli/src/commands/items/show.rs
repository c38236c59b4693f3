use lenders_core::LedgerError;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::resolve_item_id;
use crate::output::{item_json, print_item};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let store = session.store();
    let id = resolve_item_id(store, &args.id)?;
    let item = store.item(&id).ok_or_else(|| LedgerError::not_found_item(&id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&item_json(item, store.now()))?);
        return Ok(());
    }

    let ui = ctx.ui_context(false, None);
    print_item(&ui, item, &ctx.timezone()?, store.now());
    Ok(())
}

//! `lenders sync`: push, pull and share against a remote store.

use lenders_core::{DirectoryRemoteStore, LedgerError, LedgerItem, RemoteStore};

use crate::app::AppContext;
use crate::cli::{SyncArgs, SyncShareArgs};
use crate::helpers::resolve_item_ids;
use crate::ui::{print, receipt};

fn open_remote(ctx: &AppContext, flag: Option<&str>) -> anyhow::Result<DirectoryRemoteStore> {
    let root = ctx.remote_root(flag)?;
    tracing::debug!(root = %root.display(), "using directory remote");
    Ok(DirectoryRemoteStore::new(root))
}

/// Upload every ledger and wishlist item. Photos travel as assets.
pub fn handle_push(ctx: &AppContext, args: &SyncArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let remote = open_remote(ctx, args.remote.as_deref())?;
    let store = session.store();

    for item in store.items() {
        remote.save_item(item)?;
    }
    for item in store.wishlist_items() {
        remote.save_wishlist_item(item)?;
    }
    let items = store.items().len();
    let wishlist = store.wishlist_items().len();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "pushed_items": items,
                "pushed_wishlist": wishlist,
                "remote": remote.root(),
            }))?
        );
        return Ok(());
    }
    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let items = items.to_string();
        let wishlist = wishlist.to_string();
        let location = remote.root().display().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Pushed to remote",
                &[
                    ("Pushed Items", items.as_str()),
                    ("Pushed Wishlist", wishlist.as_str()),
                    ("Remote", location.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

/// Fetch remote records and add the ones this ledger does not know yet.
pub fn handle_pull(ctx: &AppContext, args: &SyncArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_ledger()?;
    let remote = open_remote(ctx, args.remote.as_deref())?;

    let fetched = remote.fetch_items()?;
    let fetched_wishlist = remote.fetch_wishlist_items()?;
    let merged = session.store_mut().merge_items(fetched);
    let merged_wishlist = session.store_mut().merge_wishlist_items(fetched_wishlist);
    session.save()?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "merged_items": merged,
                "merged_wishlist": merged_wishlist,
            }))?
        );
        return Ok(());
    }
    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let items = merged.len().to_string();
        let wishlist = merged_wishlist.len().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Pulled from remote",
                &[
                    ("Merged Items", items.as_str()),
                    ("Merged Wishlist", wishlist.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

/// Publish items into the shared zone.
pub fn handle_share(ctx: &AppContext, args: &SyncShareArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let store = session.store();
    let ids = resolve_item_ids(store, &args.ids)?;
    let items = ids
        .iter()
        .map(|id| {
            store
                .item(id)
                .cloned()
                .ok_or_else(|| LedgerError::not_found_item(id))
        })
        .collect::<Result<Vec<LedgerItem>, _>>()?;

    let remote = open_remote(ctx, args.remote.as_deref())?;
    let handle = remote.share_items(&items)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&handle)?);
        return Ok(());
    }
    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let count = handle.record_ids.len().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                &handle.title,
                &[
                    ("Zone", handle.zone.as_str()),
                    ("Records", count.as_str()),
                    ("Location", handle.location.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

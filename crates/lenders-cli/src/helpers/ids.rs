//! Item ID resolution from full UUIDs or unique prefixes.

use uuid::Uuid;

use lenders_core::LedgerStore;

use crate::errors::CliError;

fn resolve<I>(input: &str, ids: I, kind: &str, list_command: &str) -> anyhow::Result<Uuid>
where
    I: IntoIterator<Item = Uuid>,
{
    let needle = input.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(CliError::invalid_input(format!("{} ID cannot be empty", kind)).into());
    }

    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(
            format!("{} {} not found", kind, input),
            format!("Run `{}` to see IDs", list_command),
        )
        .into()),
        _ => Err(CliError::invalid_input(format!(
            "{} ID prefix {} is ambiguous ({} matches); use more characters",
            kind,
            input,
            matches.len()
        ))
        .into()),
    }
}

pub fn resolve_item_id(store: &LedgerStore, input: &str) -> anyhow::Result<Uuid> {
    resolve(
        input,
        store.items().iter().map(|item| item.id),
        "Item",
        "lenders list",
    )
}

pub fn resolve_item_ids(store: &LedgerStore, inputs: &[String]) -> anyhow::Result<Vec<Uuid>> {
    inputs
        .iter()
        .map(|input| resolve_item_id(store, input))
        .collect()
}

pub fn resolve_wishlist_id(store: &LedgerStore, input: &str) -> anyhow::Result<Uuid> {
    resolve(
        input,
        store.wishlist_items().iter().map(|item| item.id),
        "Wishlist item",
        "lenders wishlist list",
    )
}

pub fn resolve_wishlist_ids(store: &LedgerStore, inputs: &[String]) -> anyhow::Result<Vec<Uuid>> {
    inputs
        .iter()
        .map(|input| resolve_wishlist_id(store, input))
        .collect()
}

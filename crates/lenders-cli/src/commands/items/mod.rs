//! Ledger item commands: add, edit, list, show and the archive lifecycle.

mod add;
mod edit;
mod lifecycle;
mod list;
mod show;

pub use add::handle_add;
pub use edit::handle_edit;
pub use lifecycle::{handle_archive, handle_delete, handle_purge, handle_recover};
pub use list::handle_list;
pub use show::handle_show;

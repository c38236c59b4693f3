use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use lenders_core::VERSION;

/// Lender's Ledger - keep track of what you lend and borrow
#[derive(Parser)]
#[command(name = "lenders")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger file
    #[arg(short, long, global = true, env = "LENDERS_PATH")]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger and config
    Init(InitArgs),

    /// Record a lent or borrowed item
    Add(AddArgs),

    /// Change an item's details
    Edit(EditArgs),

    /// List items
    List(ListArgs),

    /// Show a single item
    Show(ShowArgs),

    /// Archive items (soft delete)
    Archive(ArchiveArgs),

    /// Bring an archived item back
    Recover(RecoverArgs),

    /// Permanently delete items
    Delete(DeleteArgs),

    /// Permanently delete items archived longer than the retention period
    Purge(PurgeArgs),

    /// Dashboard counts, popular tags and recent activity
    Stats(StatsArgs),

    /// List tags in use
    Tags(TagsArgs),

    /// Print the shareable transfer text for an item
    Share(ShareArgs),

    /// Accept an item from transfer text
    Import(ImportArgs),

    /// Add a calendar reminder for an item's return date
    Remind(RemindArgs),

    /// Manage the wishlist
    #[command(subcommand)]
    Wishlist(WishlistSubcommand),

    /// Sync with a remote store
    #[command(subcommand)]
    Sync(SyncSubcommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Days to keep archived items before purging (0 disables)
    #[arg(long)]
    pub retention_days: Option<u32>,

    /// Timezone for dates and reminders (e.g. Europe/Berlin)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Remote store directory for `sync`
    #[arg(long)]
    pub remote: Option<String>,

    /// Directory for calendar reminders
    #[arg(long)]
    pub calendar: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Item type: lent or borrowed
    #[arg(value_name = "TYPE")]
    pub item_type: String,

    /// What was lent or borrowed
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Who it was lent to or borrowed from
    #[arg(value_name = "PERSON")]
    pub person: String,

    /// Return-by date (ISO-8601 or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    /// Condition notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Attach a photo from a file
    #[arg(long, value_name = "FILE")]
    pub image: Option<String>,

    /// Add tags (repeatable or comma separated)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Set custom transaction date (ISO-8601)
    #[arg(long)]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Item ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub person: Option<String>,

    /// Item type: lent or borrowed
    #[arg(long = "type", value_name = "TYPE")]
    pub item_type: Option<String>,

    /// New return-by date
    #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
    pub due: Option<String>,

    /// Remove the return-by date
    #[arg(long)]
    pub clear_due: bool,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    #[arg(long)]
    pub clear_notes: bool,

    /// Replace the photo with a file
    #[arg(long, value_name = "FILE", conflicts_with = "clear_image")]
    pub image: Option<String>,

    #[arg(long)]
    pub clear_image: bool,

    /// Replace all tags (repeatable or comma separated)
    #[arg(short, long, value_name = "TAG", conflicts_with = "clear_tags")]
    pub tag: Vec<String>,

    #[arg(long)]
    pub clear_tags: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only active items of this type (lent or borrowed)
    #[arg(long = "type", value_name = "TYPE", conflicts_with_all = ["tag", "status", "archived"])]
    pub item_type: Option<String>,

    /// Only active items with this tag
    #[arg(long, conflicts_with_all = ["status", "archived"])]
    pub tag: Option<String>,

    /// Only items with this status (overdue, active)
    #[arg(long, conflicts_with = "archived")]
    pub status: Option<String>,

    /// Show the archive instead of active items
    #[arg(long)]
    pub archived: bool,

    /// Case-insensitive search over name, person and tags
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Item ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `archive` command
#[derive(Args)]
pub struct ArchiveArgs {
    /// Item IDs (full UUID or prefix)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the `recover` command
#[derive(Args)]
pub struct RecoverArgs {
    /// Item ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Item IDs (full UUID or prefix)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `purge` command
#[derive(Args)]
pub struct PurgeArgs {
    /// Override the configured retention period (days)
    #[arg(long)]
    pub days: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command
#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `tags` command
#[derive(Args)]
pub struct TagsArgs {
    /// Show how many active items use each tag
    #[arg(long)]
    pub counts: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `share` command
#[derive(Args)]
pub struct ShareArgs {
    /// Item ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Transfer text (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Accept without confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remind` command
#[derive(Args)]
pub struct RemindArgs {
    /// Item ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Directory to write the reminder into (overrides config)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum WishlistSubcommand {
    /// Add a wishlist item
    Add(WishlistAddArgs),

    /// List wishlist items
    List(WishlistListArgs),

    /// Show a wishlist item
    Show(WishlistShowArgs),

    /// Change a wishlist item
    Edit(WishlistEditArgs),

    /// Delete wishlist items
    Delete(WishlistDeleteArgs),
}

#[derive(Args)]
pub struct WishlistAddArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Estimated price
    #[arg(long)]
    pub price: Option<f64>,

    /// Priority: low, medium or high
    #[arg(long)]
    pub priority: Option<String>,

    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WishlistListArgs {
    /// Case-insensitive search over name, description and tags
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

#[derive(Args)]
pub struct WishlistShowArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WishlistEditArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    #[arg(long)]
    pub clear_description: bool,

    #[arg(long, conflicts_with = "clear_price")]
    pub price: Option<f64>,

    #[arg(long)]
    pub clear_price: bool,

    #[arg(long)]
    pub priority: Option<String>,

    /// Replace all tags
    #[arg(short, long, value_name = "TAG", conflicts_with = "clear_tags")]
    pub tag: Vec<String>,

    #[arg(long)]
    pub clear_tags: bool,
}

#[derive(Args)]
pub struct WishlistDeleteArgs {
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum SyncSubcommand {
    /// Upload every item and wishlist item
    Push(SyncArgs),

    /// Fetch remote items and merge the ones not known locally
    Pull(SyncArgs),

    /// Copy items into the shared zone
    Share(SyncShareArgs),
}

#[derive(Args)]
pub struct SyncArgs {
    /// Remote store directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub remote: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SyncShareArgs {
    /// Item IDs (full UUID or prefix)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Remote store directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub remote: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

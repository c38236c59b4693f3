//! Lender's Ledger CLI - keep track of what you lend and borrow
//!
//! This is the command-line interface for Lender's Ledger. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lenders_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, SyncSubcommand, WishlistSubcommand};
use crate::commands::{init, insights, items, misc, remind, sync, transfer, wishlist};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let (message, hint) = split_error_hint(&format!("{}", e));
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr, filtered by `LENDERS_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LENDERS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Split an error message at its "Hint:" line, if it has one.
fn split_error_hint(error: &str) -> (String, Option<String>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            let hint = error[idx + marker.len()..].trim().to_string();
            return (error[..idx].to_string(), Some(hint));
        }
    }
    (error.to_string(), None)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::Add(args)) => items::handle_add(ctx, args)?,
        Some(Commands::Edit(args)) => items::handle_edit(ctx, args)?,
        Some(Commands::List(args)) => items::handle_list(ctx, args)?,
        Some(Commands::Show(args)) => items::handle_show(ctx, args)?,
        Some(Commands::Archive(args)) => items::handle_archive(ctx, args)?,
        Some(Commands::Recover(args)) => items::handle_recover(ctx, args)?,
        Some(Commands::Delete(args)) => items::handle_delete(ctx, args)?,
        Some(Commands::Purge(args)) => items::handle_purge(ctx, args)?,
        Some(Commands::Stats(args)) => insights::handle_stats(ctx, args)?,
        Some(Commands::Tags(args)) => insights::handle_tags(ctx, args)?,
        Some(Commands::Share(args)) => transfer::handle_share(ctx, args)?,
        Some(Commands::Import(args)) => transfer::handle_import(ctx, args)?,
        Some(Commands::Remind(args)) => remind::handle_remind(ctx, args)?,
        Some(Commands::Wishlist(sub)) => match sub {
            WishlistSubcommand::Add(args) => wishlist::handle_add(ctx, args)?,
            WishlistSubcommand::List(args) => wishlist::handle_list(ctx, args)?,
            WishlistSubcommand::Show(args) => wishlist::handle_show(ctx, args)?,
            WishlistSubcommand::Edit(args) => wishlist::handle_edit(ctx, args)?,
            WishlistSubcommand::Delete(args) => wishlist::handle_delete(ctx, args)?,
        },
        Some(Commands::Sync(sub)) => match sub {
            SyncSubcommand::Push(args) => sync::handle_push(ctx, args)?,
            SyncSubcommand::Pull(args) => sync::handle_pull(ctx, args)?,
            SyncSubcommand::Share(args) => sync::handle_share(ctx, args)?,
        },
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            println!("Lender's Ledger v{}", VERSION);
            println!("\nRun `lenders --help` for usage information.");
        }
    }
    Ok(())
}

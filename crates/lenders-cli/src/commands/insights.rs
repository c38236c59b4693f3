//! `lenders stats` and `lenders tags`.

use lenders_core::query::recent_activity;
use lenders_core::stats::{distinct_active_tags, tag_frequency};

use crate::app::AppContext;
use crate::cli::{StatsArgs, TagsArgs};
use crate::constants::{POPULAR_TAG_LIMIT, RECENT_ACTIVITY_LIMIT};
use crate::output::stats_json;
use crate::ui::theme::{styled, styles, DOT, OVERDUE};
use crate::ui::{
    blank_line, divider, format_datetime, header, kv, parse_output_format, print, short_id,
    single_line, table, truncate, Column,
};

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    parse_output_format(args.format.as_deref(), args.json)?;
    let session = ctx.open_ledger()?;
    let store = session.store();
    let now = store.now();

    let stats = store.stats();
    let mut popular = tag_frequency(store.items());
    popular.truncate(POPULAR_TAG_LIMIT);
    let recent = recent_activity(store.items(), RECENT_ACTIVITY_LIMIT);

    if args.json {
        let value = stats_json(&stats, &popular, &recent, now);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let ui = ctx.ui_context(false, args.format.as_deref());
    if !ui.mode.is_pretty() {
        println!("lent={}", stats.lent);
        println!("borrowed={}", stats.borrowed);
        println!("overdue={}", stats.overdue);
        println!("total_active={}", stats.total_active);
        println!("archived={}", stats.archived);
        println!("wishlist={}", stats.wishlist);
        let tags: Vec<String> = popular
            .iter()
            .map(|(tag, count)| format!("{}:{}", tag, count))
            .collect();
        println!("popular_tags={}", tags.join(","));
        for item in &recent {
            println!("recent={}", item.id);
        }
        return Ok(());
    }

    let tz = ctx.timezone()?;
    if !ctx.quiet() {
        print(&ui, &header(&ui, "stats", None));
        print(&ui, &divider(&ui));
    }
    println!("{}", kv(&ui, "Lent", &stats.lent.to_string()));
    println!("{}", kv(&ui, "Borrowed", &stats.borrowed.to_string()));
    let overdue = if stats.overdue > 0 {
        styled(&stats.overdue.to_string(), styles::alert(), ui.color)
    } else {
        stats.overdue.to_string()
    };
    println!("{}", kv(&ui, "Overdue", &overdue));
    println!("{}", kv(&ui, "Total active", &stats.total_active.to_string()));
    println!("{}", kv(&ui, "Archived", &stats.archived.to_string()));
    println!("{}", kv(&ui, "Wishlist", &stats.wishlist.to_string()));

    if !popular.is_empty() {
        blank_line(&ui);
        print(&ui, &styled("Popular tags", styles::bold(), ui.color));
        let tags: Vec<String> = popular
            .iter()
            .map(|(tag, count)| format!("{} ({})", styled(tag, styles::tag(), ui.color), count))
            .collect();
        println!("{}", tags.join(", "));
    }

    if !recent.is_empty() {
        blank_line(&ui);
        print(&ui, &styled("Recent activity", styles::bold(), ui.color));
        let dot = DOT.get(ui.unicode);
        for item in &recent {
            let marker = if item.is_overdue_at(now) {
                format!(" {}", styled(OVERDUE.get(ui.unicode), styles::alert(), ui.color))
            } else {
                String::new()
            };
            println!(
                "  {}  {} {} {} {} {}{}",
                styled(&short_id(&item.id), styles::dim(), ui.color),
                truncate(&single_line(&item.name), 32),
                dot,
                item.counterparty_label(),
                dot,
                format_datetime(&item.date, &tz, true),
                marker
            );
        }
    }
    Ok(())
}

pub fn handle_tags(ctx: &AppContext, args: &TagsArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let items = session.store().items();

    if args.counts {
        let frequency = tag_frequency(items);
        if args.json {
            let value: Vec<serde_json::Value> = frequency
                .iter()
                .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            let ui = ctx.ui_context(false, None);
            let rows: Vec<Vec<String>> = frequency
                .iter()
                .map(|(tag, count)| vec![tag.clone(), count.to_string()])
                .collect();
            print(&ui, &table(&ui, &[Column::new("Tag"), Column::new("Items")], &rows));
        }
        return Ok(());
    }

    let tags = distinct_active_tags(items);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        for tag in tags {
            println!("{}", tag);
        }
    }
    Ok(())
}

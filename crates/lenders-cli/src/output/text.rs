//! Text and table output formatting for items.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use lenders_core::{LedgerItem, WishlistItem};

use crate::ui::theme::{styled, styles, DOT, OVERDUE};
use crate::ui::{
    blank_line, format_datetime, format_price, header, hint, kv, print, short_id, simple_table,
    single_line, truncate, Column, UiContext,
};

fn status_label(item: &LedgerItem, now: DateTime<Utc>) -> &'static str {
    if item.is_archived {
        "archived"
    } else if item.is_overdue_at(now) {
        "overdue"
    } else {
        "active"
    }
}

fn return_by(item: &LedgerItem, tz: &Tz, pretty: bool) -> String {
    item.return_by_date
        .as_ref()
        .map(|due| format_datetime(due, tz, pretty))
        .unwrap_or_else(|| "-".to_string())
}

/// Print a list of items as a table (pretty) or tab-separated rows (plain).
///
/// Plain columns: id, type, name, person, date, return_by, status, tags.
pub fn print_item_list(
    ui: &UiContext,
    items: &[&LedgerItem],
    tz: &Tz,
    now: DateTime<Utc>,
    context: Option<&str>,
    quiet: bool,
) {
    let pretty = ui.mode.is_pretty();

    if pretty && !quiet {
        print(ui, &header(ui, "list", context));
        blank_line(ui);
    }

    if items.is_empty() {
        if pretty && !quiet {
            print(ui, &styled("No items.", styles::dim(), ui.color));
            print(ui, &hint(ui, "lenders add lent \"The Hobbit\" Alex"));
        }
        return;
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            if pretty {
                let mut due = return_by(item, tz, true);
                if item.is_overdue_at(now) {
                    due = styled(
                        &format!("{} {}", due, OVERDUE.get(ui.unicode)),
                        styles::alert(),
                        ui.color,
                    );
                }
                vec![
                    short_id(&item.id),
                    truncate(&single_line(&item.name), 32),
                    item.counterparty_label(),
                    format_datetime(&item.date, tz, true),
                    due,
                    styled(&item.tags.join(", "), styles::tag(), ui.color),
                ]
            } else {
                vec![
                    item.id.to_string(),
                    item.item_type.as_str().to_string(),
                    single_line(&item.name),
                    single_line(&item.person),
                    format_datetime(&item.date, tz, false),
                    return_by(item, tz, false),
                    status_label(item, now).to_string(),
                    item.tags.join(","),
                ]
            }
        })
        .collect();

    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Person"),
        Column::new("Date"),
        Column::new("Return By"),
        Column::new("Tags"),
    ];
    print(ui, &simple_table(ui, &columns, &rows));

    if pretty && !quiet {
        blank_line(ui);
        let count = format!(
            "{} item{}",
            items.len(),
            if items.len() == 1 { "" } else { "s" }
        );
        print(ui, &styled(&count, styles::dim(), ui.color));
    }
}

/// Print every field of one item.
pub fn print_item(ui: &UiContext, item: &LedgerItem, tz: &Tz, now: DateTime<Utc>) {
    let pretty = ui.mode.is_pretty();

    if pretty {
        let mut title = styled(&item.name, styles::bold(), ui.color);
        if item.is_overdue_at(now) {
            title = format!(
                "{} {}",
                title,
                styled(
                    &format!("{} Overdue", OVERDUE.get(ui.unicode)),
                    styles::alert(),
                    ui.color
                )
            );
        }
        print(ui, &title);
        print(
            ui,
            &styled(
                &format!(
                    "{} {} {}",
                    item.item_type,
                    DOT.get(ui.unicode),
                    item.counterparty_label()
                ),
                styles::dim(),
                ui.color,
            ),
        );
        blank_line(ui);
    } else {
        println!("{}", kv(ui, "Name", &single_line(&item.name)));
        println!("{}", kv(ui, "Person", &single_line(&item.person)));
        println!("{}", kv(ui, "Type", item.item_type.as_str()));
        println!("{}", kv(ui, "Status", status_label(item, now)));
    }

    println!("{}", kv(ui, "ID", &item.id.to_string()));
    println!("{}", kv(ui, "Date", &format_datetime(&item.date, tz, pretty)));
    if let Some(due) = item.return_by_date.as_ref() {
        println!("{}", kv(ui, "Return By", &format_datetime(due, tz, pretty)));
    }
    if let Some(at) = item.archived_at.as_ref().filter(|_| item.is_archived) {
        println!("{}", kv(ui, "Archived", &format_datetime(at, tz, pretty)));
    }
    if !item.tags.is_empty() {
        let joined = if pretty {
            styled(&item.tags.join(", "), styles::tag(), ui.color)
        } else {
            item.tags.join(",")
        };
        println!("{}", kv(ui, "Tags", &joined));
    }
    if let Some(image) = item.image_data.as_ref() {
        println!("{}", kv(ui, "Photo", &format!("{} bytes", image.len())));
    }
    if let Some(notes) = item.condition_notes.as_ref() {
        if pretty {
            blank_line(ui);
            print(ui, &styled("Condition notes", styles::dim(), ui.color));
            println!("{}", notes);
        } else {
            println!("{}", kv(ui, "Condition Notes", &single_line(notes)));
        }
    }
}

/// Print wishlist items as a table (pretty) or tab-separated rows (plain).
///
/// Plain columns: id, priority, name, price, date_added, tags.
pub fn print_wishlist_list(ui: &UiContext, items: &[&WishlistItem], tz: &Tz, quiet: bool) {
    let pretty = ui.mode.is_pretty();

    if pretty && !quiet {
        print(ui, &header(ui, "wishlist", None));
        blank_line(ui);
    }

    if items.is_empty() {
        if pretty && !quiet {
            print(ui, &styled("Your wishlist is empty.", styles::dim(), ui.color));
            print(ui, &hint(ui, "lenders wishlist add \"Kayak\" --price 349"));
        }
        return;
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let price = item
                .estimated_price
                .map(format_price)
                .unwrap_or_else(|| "-".to_string());
            if pretty {
                vec![
                    short_id(&item.id),
                    truncate(&single_line(&item.name), 32),
                    item.priority.to_string(),
                    price,
                    format_datetime(&item.date_added, tz, true),
                    styled(&item.tags.join(", "), styles::tag(), ui.color),
                ]
            } else {
                vec![
                    item.id.to_string(),
                    item.priority.as_str().to_string(),
                    single_line(&item.name),
                    price,
                    format_datetime(&item.date_added, tz, false),
                    item.tags.join(","),
                ]
            }
        })
        .collect();

    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Priority"),
        Column::new("Price"),
        Column::new("Added"),
        Column::new("Tags"),
    ];
    print(ui, &simple_table(ui, &columns, &rows));
}

pub fn print_wishlist_item(ui: &UiContext, item: &WishlistItem, tz: &Tz) {
    let pretty = ui.mode.is_pretty();

    if pretty {
        print(ui, &styled(&item.name, styles::bold(), ui.color));
        blank_line(ui);
    } else {
        println!("{}", kv(ui, "Name", &single_line(&item.name)));
    }
    println!("{}", kv(ui, "ID", &item.id.to_string()));
    println!("{}", kv(ui, "Priority", item.priority.as_str()));
    if let Some(price) = item.estimated_price {
        println!("{}", kv(ui, "Price", &format_price(price)));
    }
    println!(
        "{}",
        kv(ui, "Added", &format_datetime(&item.date_added, tz, pretty))
    );
    if !item.tags.is_empty() {
        println!("{}", kv(ui, "Tags", &item.tags.join(if pretty { ", " } else { "," })));
    }
    if let Some(description) = item.description.as_ref() {
        println!("{}", kv(ui, "Description", &single_line(description)));
    }
}

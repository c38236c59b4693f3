use lenders_core::{add_return_reminder, IcsCalendar, LedgerError};

use crate::app::AppContext;
use crate::cli::RemindArgs;
use crate::helpers::resolve_item_id;
use crate::ui::{format_datetime, print, receipt};

pub fn handle_remind(ctx: &AppContext, args: &RemindArgs) -> anyhow::Result<()> {
    let session = ctx.open_ledger()?;
    let store = session.store();
    let id = resolve_item_id(store, &args.id)?;
    let item = store.item(&id).ok_or_else(|| LedgerError::not_found_item(&id))?;
    let tz = ctx.timezone()?;

    let mut calendar = IcsCalendar::new(ctx.calendar_dir(args.dir.as_deref())?);
    let reminder = add_return_reminder(&mut calendar, item, &tz)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let pretty = ui.mode.is_pretty();
        let starts = format_datetime(&reminder.start, &tz, pretty);
        let alarm = format_datetime(&reminder.alarm_at(), &tz, pretty);
        let file = calendar.event_path(&id).display().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                &format!("Reminder added: {}", reminder.title),
                &[
                    ("Item ID", id.to_string().as_str()),
                    ("Starts", starts.as_str()),
                    ("Alarm", alarm.as_str()),
                    ("File", file.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

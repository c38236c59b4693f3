//! Return reminders and the calendar boundary.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::fs::write_atomic;
use crate::model::LedgerItem;

/// A calendar event reminding the user to hand an item back (or chase it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReminder {
    pub item_id: Uuid,
    pub title: String,
    pub notes: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Alarm offset relative to `start`; negative means before.
    pub alarm_offset: Duration,
}

impl ReturnReminder {
    /// Build the reminder for `item`, starting at the beginning of its
    /// return day in `tz` and lasting one hour, with an alarm a day ahead.
    ///
    /// Returns `None` when the item has no return date.
    pub fn for_item<Tz: TimeZone>(item: &LedgerItem, tz: &Tz) -> Option<Self> {
        let due = item.return_by_date?;
        let local_day = due.with_timezone(tz).date_naive();
        let start = local_day
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
            .map(|local| local.with_timezone(&Utc))
            // midnight skipped by a DST jump
            .unwrap_or(due);

        Some(Self {
            item_id: item.id,
            title: format!("Return: {}", item.name),
            notes: format!("Return {} to {}", item.name, item.person),
            start,
            end: start + Duration::hours(1),
            alarm_offset: -Duration::hours(24),
        })
    }

    pub fn alarm_at(&self) -> DateTime<Utc> {
        self.start + self.alarm_offset
    }
}

/// A calendar that reminders can be written to.
pub trait CalendarService {
    /// Ask for write access. Returns whether access is granted.
    fn request_access(&mut self) -> bool;

    fn add_reminder(&mut self, reminder: &ReturnReminder) -> Result<()>;
}

/// Request access, then add the return reminder for `item`.
///
/// # Errors
///
/// `RemoteOperationFailure` if the item has no return date, access is
/// denied, or the calendar rejects the event.
pub fn add_return_reminder<C, Tz>(calendar: &mut C, item: &LedgerItem, tz: &Tz) -> Result<ReturnReminder>
where
    C: CalendarService + ?Sized,
    Tz: TimeZone,
{
    let reminder = ReturnReminder::for_item(item, tz).ok_or_else(|| {
        LedgerError::RemoteOperationFailure(format!("\"{}\" has no return date", item.name))
    })?;
    if !calendar.request_access() {
        return Err(LedgerError::RemoteOperationFailure(
            "Calendar access denied".to_string(),
        ));
    }
    calendar.add_reminder(&reminder)?;
    tracing::info!(item = %item.id, start = %reminder.start, "added return reminder");
    Ok(reminder)
}

/// Writes each reminder as an iCalendar file, one per item.
#[derive(Debug, Clone)]
pub struct IcsCalendar {
    dir: PathBuf,
}

impl IcsCalendar {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn event_path(&self, item_id: &Uuid) -> PathBuf {
        self.dir.join(format!("return-{}.ics", item_id))
    }
}

impl CalendarService for IcsCalendar {
    fn request_access(&mut self) -> bool {
        match fs::create_dir_all(&self.dir) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "calendar directory unavailable");
                false
            }
        }
    }

    fn add_reminder(&mut self, reminder: &ReturnReminder) -> Result<()> {
        let body = render_ics(reminder, Utc::now());
        write_atomic(&self.event_path(&reminder.item_id), body.as_bytes())
            .map_err(|e| LedgerError::RemoteOperationFailure(format!("Save calendar event failed: {}", e)))
    }
}

fn render_ics(reminder: &ReturnReminder, stamp: DateTime<Utc>) -> String {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:-//lenders-ledger//{}//EN", env!("CARGO_PKG_VERSION")),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@lenders-ledger", reminder.item_id),
        format!("DTSTAMP:{}", ics_time(stamp)),
        format!("DTSTART:{}", ics_time(reminder.start)),
        format!("DTEND:{}", ics_time(reminder.end)),
        format!("SUMMARY:{}", escape_text(&reminder.title)),
        format!("DESCRIPTION:{}", escape_text(&reminder.notes)),
        "BEGIN:VALARM".to_string(),
        "ACTION:DISPLAY".to_string(),
        format!("DESCRIPTION:{}", escape_text(&reminder.title)),
        format!("TRIGGER:{}", ics_offset(reminder.alarm_offset)),
        "END:VALARM".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

fn ics_time(time: DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

fn ics_offset(offset: Duration) -> String {
    let minutes = offset.num_minutes();
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    if minutes % 60 == 0 {
        format!("{}PT{}H", sign, minutes / 60)
    } else {
        format!("{}PT{}M", sign, minutes)
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

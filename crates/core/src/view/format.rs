//! Display formatting for ticket table rows.

use chrono::{DateTime, Local, Locale, TimeZone, Utc};

use crate::ticket::{Ticket, TicketStatus};

/// Segment width for wrapped text columns.
pub const WRAP_WIDTH: usize = 30;

/// Locale date followed by locale time.
const TIMESTAMP_FORMAT: &str = "%x %X";

/// Split `text` into segments of exactly `width` characters, the last one
/// holding the remainder.
///
/// Boundaries ignore words. An empty string yields no segments. `width` of 0
/// is treated as 1.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// The viewer's locale as reported by the OS, or `POSIX` when it is unset or
/// not one chrono knows.
pub fn viewer_locale() -> Locale {
    sys_locale::get_locale()
        .and_then(|tag| parse_locale(&tag))
        .unwrap_or(Locale::POSIX)
}

/// Parse a locale tag such as `de-DE`, `de_DE.UTF-8` or `sr_RS@latin`.
pub fn parse_locale(tag: &str) -> Option<Locale> {
    let base = tag.split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" {
        return Some(Locale::POSIX);
    }
    Locale::try_from(base.replace('-', "_").as_str()).ok()
}

/// Render a timestamp in the viewer's time zone and date/time convention.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    format_timestamp_in(at, &Local, viewer_locale())
}

/// Render a timestamp in an explicit time zone and locale.
pub fn format_timestamp_in<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz, locale: Locale) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz)
        .format_localized(TIMESTAMP_FORMAT, locale)
        .to_string()
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRow {
    pub id: String,
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub contact_info: Vec<String>,
    pub status: TicketStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl TicketRow {
    /// Render a ticket with timestamps in the viewer's zone and locale.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self::from_ticket_in(ticket, &Local, viewer_locale())
    }

    pub fn from_ticket_in<Tz: TimeZone>(ticket: &Ticket, tz: &Tz, locale: Locale) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: ticket.id.clone(),
            title: wrap_text(&ticket.title, WRAP_WIDTH),
            description: wrap_text(&ticket.description, WRAP_WIDTH),
            contact_info: wrap_text(&ticket.contact_info, WRAP_WIDTH),
            status: ticket.status,
            created_at: format_timestamp_in(ticket.created_at, tz, locale),
            updated_at: format_timestamp_in(ticket.updated_at, tz, locale),
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

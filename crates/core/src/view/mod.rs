//! Client-side table view-model: sorting, status filtering and row rendering.

mod filter;
mod format;
mod projector;
mod sort;

pub use filter::StatusFilter;
pub use format::{
    format_timestamp, format_timestamp_in, parse_locale, viewer_locale, wrap_text, TicketRow,
    WRAP_WIDTH,
};
pub use projector::{project, TicketView};
pub use sort::{sort_tickets, SortDirection, SortKey, SortSpec};

use thiserror::Error;

use crate::ticket::UnknownStatus;

/// Errors from parsing view state out of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),
}

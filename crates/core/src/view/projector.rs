//! Projection of a ticket collection into the rows a table displays.

use super::{sort_tickets, SortKey, SortSpec, StatusFilter};
use crate::ticket::{Ticket, TicketStatus};

/// Filter, then sort, a ticket collection.
///
/// Pure: `tickets` is left untouched and the result borrows from it. Because
/// filtering only selects a subset, the outcome equals sorting the filtered
/// subset. With no sort the input order is kept.
pub fn project<'a>(
    tickets: &'a [Ticket],
    sort: Option<SortSpec>,
    filter: &StatusFilter,
) -> Vec<&'a Ticket> {
    let mut rows: Vec<&Ticket> = tickets.iter().filter(|t| filter.matches(t)).collect();
    if let Some(spec) = sort {
        sort_tickets(&mut rows, spec);
    }
    rows
}

/// Sort and filter state of a ticket table.
///
/// Holds nothing but the two specs; the displayed sequence is always derived
/// with [`TicketView::project`] and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketView {
    sort: Option<SortSpec>,
    filter: StatusFilter,
}

impl TicketView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    /// Column header clicked: sort by `key`, flipping direction on a repeat click.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        let spec = SortSpec::toggled(self.sort, key);
        self.sort = Some(spec);
        spec
    }

    /// Status chip clicked: add or remove it from the filter.
    pub fn toggle_status_filter(&mut self, status: TicketStatus) -> bool {
        self.filter.toggle(status)
    }

    /// Displayed sequence for `tickets` under the current state.
    pub fn project<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        project(tickets, self.sort, &self.filter)
    }
}

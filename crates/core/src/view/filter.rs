//! Multi-select status filter.

use std::collections::HashSet;
use std::str::FromStr;

use super::ViewError;
use crate::ticket::{Ticket, TicketStatus};

/// Set of statuses selected in the table's filter.
///
/// An empty selection filters nothing. A non-empty one keeps a ticket when its
/// status is any of the selected ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    selected: HashSet<TicketStatus>,
}

impl StatusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `status`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, status: TicketStatus) -> bool {
        if self.selected.remove(&status) {
            false
        } else {
            self.selected.insert(status);
            true
        }
    }

    pub fn contains(&self, status: TicketStatus) -> bool {
        self.selected.contains(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop every selection, showing all tickets again.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected statuses in declaration order, for rendering filter chips.
    pub fn selected(&self) -> Vec<TicketStatus> {
        TicketStatus::ALL
            .into_iter()
            .filter(|s| self.selected.contains(s))
            .collect()
    }

    /// Whether `ticket` passes the filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.selected.is_empty() || self.selected.contains(&ticket.status)
    }
}

impl FromIterator<TicketStatus> for StatusFilter {
    fn from_iter<I: IntoIterator<Item = TicketStatus>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

/// Parses a comma-separated list of status labels, e.g. `"Pending,Resolved"`.
/// Blank entries are skipped, so `""` is the empty filter.
impl FromStr for StatusFilter {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| name.parse::<TicketStatus>().map_err(ViewError::from))
            .collect()
    }
}

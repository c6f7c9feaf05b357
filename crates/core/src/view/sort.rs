//! Single-key ticket sorting with a toggling direction.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ViewError;
use crate::ticket::Ticket;

/// Ticket field a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Title,
    Description,
    ContactInfo,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortKey {
    /// Every sortable field, in table column order.
    pub const ALL: [SortKey; 6] = [
        SortKey::Title,
        SortKey::Description,
        SortKey::ContactInfo,
        SortKey::Status,
        SortKey::CreatedAt,
        SortKey::UpdatedAt,
    ];

    /// Field name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Description => "description",
            SortKey::ContactInfo => "contactInfo",
            SortKey::Status => "status",
            SortKey::CreatedAt => "createdAt",
            SortKey::UpdatedAt => "updatedAt",
        }
    }

    /// Ascending comparison of two tickets on this field.
    ///
    /// Text compares lexicographically, timestamps chronologically and status
    /// by its label, so `Accepted < Pending < Rejected < Resolved < Ticket Created`.
    pub fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::ContactInfo => a.contact_info.cmp(&b.contact_info),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ViewError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort: which field, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Next sort after the user picks `key`.
    ///
    /// Picking the ascending key again flips it to descending; anything else
    /// (a new key, or the descending key) starts over ascending.
    pub fn toggled(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
                SortSpec::descending(key)
            }
            _ => SortSpec::ascending(key),
        }
    }
}

/// Sort tickets in place by `spec`.
///
/// Descending is a stable ascending sort followed by reversing the whole
/// sequence, so tickets with equal keys come out in reverse input order.
pub fn sort_tickets(tickets: &mut [&Ticket], spec: SortSpec) {
    tickets.sort_by(|a, b| spec.key.compare(a, b));
    if spec.direction == SortDirection::Descending {
        tickets.reverse();
    }
}

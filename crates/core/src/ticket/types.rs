//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Status
// ============================================================================

/// Lifecycle status of a support ticket.
///
/// Serialized with the labels the ticket store uses on the wire, so
/// `TicketCreated` travels as `"Ticket Created"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    #[serde(rename = "Ticket Created")]
    TicketCreated,
    Pending,
    Accepted,
    Resolved,
    Rejected,
}

impl TicketStatus {
    /// Every status, in declaration order.
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::TicketCreated,
        TicketStatus::Pending,
        TicketStatus::Accepted,
        TicketStatus::Resolved,
        TicketStatus::Rejected,
    ];

    /// Statuses a user may pick when editing a ticket, in the order an edit
    /// form lists them. `TicketCreated` is only ever assigned at creation.
    pub const EDITABLE: [TicketStatus; 4] = [
        TicketStatus::Pending,
        TicketStatus::Accepted,
        TicketStatus::Resolved,
        TicketStatus::Rejected,
    ];

    /// Wire/display label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::TicketCreated => "Ticket Created",
            TicketStatus::Pending => "Pending",
            TicketStatus::Accepted => "Accepted",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Rejected => "Rejected",
        }
    }

    /// Whether an update may move a ticket into this status.
    pub fn is_editable(&self) -> bool {
        TicketStatus::EDITABLE.contains(self)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known status labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ticket status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ============================================================================
// Ticket
// ============================================================================

/// A support ticket as held by the ticket store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Opaque identifier assigned by the store. Stable across updates.
    pub id: String,
    pub title: String,
    pub description: String,
    pub contact_info: String,
    pub status: TicketStatus,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every update.
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body of `POST /ticket`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub contact_info: String,
    pub status: TicketStatus,
}

impl NewTicket {
    /// Create a ticket draft in the `TicketCreated` status.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        contact_info: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            contact_info: contact_info.into(),
            status: TicketStatus::TicketCreated,
        }
    }
}

/// Body of `PUT /ticket/{id}`.
///
/// `updated_at` carries the client's clock; the store ignores it and stamps
/// its own time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub contact_info: String,
    pub status: TicketStatus,
    pub updated_at: DateTime<Utc>,
}

impl TicketUpdate {
    /// Start an edit draft prefilled with the ticket's current fields.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            contact_info: ticket.contact_info.clone(),
            status: ticket.status,
            updated_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = contact_info.into();
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    /// Restamp the draft with the current time right before it is sent.
    pub fn touch(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }
}

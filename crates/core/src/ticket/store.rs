//! Ticket storage trait and types.

use std::fmt;

use crate::ticket::{NewTicket, Ticket, TicketStatus};

/// Error type for ticket operations.
#[derive(Debug)]
pub enum TicketError {
    /// Ticket not found.
    NotFound(String),
    /// The identifier is not one this store could have issued.
    InvalidId(String),
    /// The update would move a ticket into a status users may not pick.
    StatusNotEditable(TicketStatus),
    /// Backing storage failed.
    Storage(String),
}

impl fmt::Display for TicketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketError::NotFound(id) => write!(f, "Ticket not found: {}", id),
            TicketError::InvalidId(id) => write!(f, "Invalid ticket ID: {}", id),
            TicketError::StatusNotEditable(status) => {
                write!(f, "Status cannot be set by an update: {}", status)
            }
            TicketError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TicketError {}

/// Fields a client may change on an existing ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketChanges {
    pub title: String,
    pub description: String,
    pub contact_info: String,
    pub status: TicketStatus,
}

/// Trait for ticket storage backends.
///
/// There is no delete: tickets live for the lifetime of the store.
pub trait TicketStore: Send + Sync {
    /// Create a new ticket. The store assigns the id and both timestamps,
    /// and the ticket always starts as `TicketCreated`.
    fn create(&self, request: NewTicket) -> Result<Ticket, TicketError>;

    /// List all tickets in insertion order.
    fn list(&self) -> Result<Vec<Ticket>, TicketError>;

    /// Apply changes to a ticket and refresh its `updated_at`.
    ///
    /// A ticket may keep a non-editable status but never move into one.
    fn update(&self, id: &str, changes: TicketChanges) -> Result<Ticket, TicketError>;
}

//! In-memory ticket store.

use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::{NewTicket, Ticket, TicketChanges, TicketError, TicketStatus, TicketStore};

/// Ticket store that keeps every ticket in process memory.
///
/// Tickets are kept in insertion order, which is the order `list` returns.
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<Vec<Ticket>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with tickets (useful for testing).
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: RwLock::new(tickets),
        }
    }

    /// Ids issued by this store are simple-format UUIDs.
    fn check_id(id: &str) -> Result<(), TicketError> {
        Uuid::parse_str(id)
            .map(|_| ())
            .map_err(|_| TicketError::InvalidId(id.to_string()))
    }
}

fn poisoned<T>(_: T) -> TicketError {
    TicketError::Storage("ticket store lock poisoned".to_string())
}

impl TicketStore for InMemoryTicketStore {
    fn create(&self, request: NewTicket) -> Result<Ticket, TicketError> {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4().simple().to_string(),
            title: request.title,
            description: request.description,
            contact_info: request.contact_info,
            status: TicketStatus::TicketCreated,
            created_at: now,
            updated_at: now,
        };

        self.tickets.write().map_err(poisoned)?.push(ticket.clone());
        debug!(ticket_id = %ticket.id, "Ticket created");

        Ok(ticket)
    }

    fn list(&self) -> Result<Vec<Ticket>, TicketError> {
        Ok(self.tickets.read().map_err(poisoned)?.clone())
    }

    fn update(&self, id: &str, changes: TicketChanges) -> Result<Ticket, TicketError> {
        Self::check_id(id)?;
        let mut tickets = self.tickets.write().map_err(poisoned)?;

        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TicketError::NotFound(id.to_string()))?;

        if !changes.status.is_editable() && changes.status != ticket.status {
            return Err(TicketError::StatusNotEditable(changes.status));
        }

        ticket.title = changes.title;
        ticket.description = changes.description;
        ticket.contact_info = changes.contact_info;
        ticket.status = changes.status;
        // Clock skew must never put updated_at before created_at.
        ticket.updated_at = Utc::now().max(ticket.created_at);

        debug!(ticket_id = %id, status = %ticket.status, "Ticket updated");

        Ok(ticket.clone())
    }
}

//! Support tickets and the store that holds them.

mod memory_store;
mod store;
mod types;

pub use memory_store::InMemoryTicketStore;
pub use store::{TicketChanges, TicketError, TicketStore};
pub use types::{NewTicket, Ticket, TicketStatus, TicketUpdate, UnknownStatus};

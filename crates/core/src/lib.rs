//! Support ticket client core: ticket model, ticket store, API client and the
//! table view-model that sorts, filters and renders tickets.

pub mod client;
pub mod config;
pub mod session;
pub mod testing;
pub mod ticket;
pub mod view;

pub use client::{ClientError, HttpTicketClient, TicketApi};
pub use config::{
    load_config, load_config_from_str, validate_config, ClientConfig, Config, ConfigError,
    ServerConfig,
};
pub use session::{LogNotifier, Notice, NoticeLevel, Notifier, RefreshOutcome, TicketSession};
pub use ticket::{
    InMemoryTicketStore, NewTicket, Ticket, TicketChanges, TicketError, TicketStatus, TicketStore,
    TicketUpdate, UnknownStatus,
};
pub use view::{
    format_timestamp, project, wrap_text, SortDirection, SortKey, SortSpec, StatusFilter,
    TicketRow, TicketView, ViewError, WRAP_WIDTH,
};

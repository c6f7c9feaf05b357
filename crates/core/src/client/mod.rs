//! Client side of the ticket store's JSON-over-HTTP API.
//!
//! The [`TicketApi`] trait is the seam the session talks through; the
//! reqwest-backed [`HttpTicketClient`] is the production implementation.

mod http;

pub use http::HttpTicketClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::ticket::{NewTicket, Ticket, TicketUpdate};

/// Errors that can occur when talking to the ticket store.
///
/// All of these are transport-level failures from the caller's point of view:
/// nothing is retried and no partial result exists.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The store answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The response body was not what the store should send.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client could not be constructed from its configuration.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Operations exposed by the remote ticket store.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// `GET /tickets`: every ticket, in the store's order.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError>;

    /// `POST /ticket`: create a ticket; the store assigns id and timestamps.
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ClientError>;

    /// `PUT /ticket/{id}`: overwrite the editable fields of a ticket.
    async fn update_ticket(&self, update: &TicketUpdate) -> Result<Ticket, ClientError>;
}

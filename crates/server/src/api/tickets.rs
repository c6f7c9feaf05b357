//! Ticket API handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use helpdesk_core::{NewTicket, Ticket, TicketChanges, TicketError, TicketStatus};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a ticket.
///
/// Missing text fields are stored as empty strings. A `status` field may be
/// present; it is ignored because every ticket starts as "Ticket Created".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_info: String,
}

/// Request body for updating a ticket.
///
/// Clients also send `id` and `updatedAt`; the path id and the server clock
/// take precedence, so both are ignored. Missing text fields become empty
/// strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_info: String,
    pub status: TicketStatus,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct TicketErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<TicketErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(TicketErrorResponse {
            error: message.into(),
        }),
    )
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    debug!("Rejected ticket body: {}", rejection);
    api_error(StatusCode::BAD_REQUEST, "Invalid ticket data")
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTicketBody>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Json(body) = body.map_err(invalid_body)?;

    let request = NewTicket::new(body.title, body.description, body.contact_info);

    match state.ticket_store().create(request) {
        Ok(ticket) => {
            info!(ticket_id = %ticket.id, "Ticket created");
            Ok(Json(ticket))
        }
        Err(e) => {
            error!("Failed to create ticket: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create ticket",
            ))
        }
    }
}

/// List every ticket in insertion order
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    match state.ticket_store().list() {
        Ok(tickets) => Ok(Json(tickets)),
        Err(e) => {
            error!("Failed to fetch tickets: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch for tickets",
            ))
        }
    }
}

/// Update a ticket's editable fields
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTicketBody>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Json(body) = body.map_err(invalid_body)?;

    let changes = TicketChanges {
        title: body.title,
        description: body.description,
        contact_info: body.contact_info,
        status: body.status,
    };

    match state.ticket_store().update(&id, changes) {
        Ok(ticket) => {
            info!(ticket_id = %ticket.id, status = %ticket.status, "Ticket updated");
            Ok(Json(ticket))
        }
        Err(TicketError::NotFound(_)) => {
            Err(api_error(StatusCode::NOT_FOUND, "Ticket not found"))
        }
        Err(TicketError::InvalidId(_)) => {
            Err(api_error(StatusCode::BAD_REQUEST, "Invalid ticket ID"))
        }
        Err(TicketError::StatusNotEditable(status)) => {
            debug!(ticket_id = %id, %status, "Rejected move into non-editable status");
            Err(api_error(StatusCode::BAD_REQUEST, "Invalid ticket status"))
        }
        Err(e) => {
            error!(ticket_id = %id, "Failed to update ticket: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update ticket",
            ))
        }
    }
}

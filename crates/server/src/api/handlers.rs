use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

/// Liveness probe. Also reports how many tickets the store holds.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tickets: usize,
    pub port: u16,
}

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let tickets = state.ticket_store().list().map_err(|e| {
        error!("Health check could not read the ticket store: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    Ok(Json(HealthResponse {
        status: "ok",
        tickets: tickets.len(),
        port: state.config().server.port,
    }))
}

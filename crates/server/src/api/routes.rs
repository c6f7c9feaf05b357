use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Tickets
        .route("/tickets", get(tickets::list_tickets))
        .route("/ticket", post(tickets::create_ticket))
        .route("/ticket/{id}", put(tickets::update_ticket))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Open ticket queries for the admin view

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::ApiError;
use crate::data::types::TicketThread;
use crate::domain::tickets::TicketService;

/// Shared state for ticket endpoints
#[derive(Clone)]
pub struct TicketsState {
    pub tickets: Arc<TicketService>,
}

/// Build ticket routes
pub fn routes(tickets: Arc<TicketService>) -> Router<()> {
    Router::new()
        .route("/", get(list_open_tickets))
        .with_state(TicketsState { tickets })
}

/// List open tickets with their message threads
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    tag = "tickets",
    responses(
        (status = 200, description = "Open tickets with full conversation threads", body = [TicketThread])
    )
)]
pub async fn list_open_tickets(
    State(state): State<TicketsState>,
) -> Result<Json<Vec<TicketThread>>, ApiError> {
    let threads = state
        .tickets
        .open_threads()
        .await
        .map_err(ApiError::from_ticket)?;

    Ok(Json(threads))
}

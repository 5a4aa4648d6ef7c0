//! Agent reply endpoint
//!
//! The admin page submits replies as a plain HTML form, so responses are
//! browser-facing: success redirects back to the admin view and a missing
//! ticket is reported as plain text.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::types::ApiError;
use crate::domain::tickets::{TicketError, TicketService};

/// Form fields submitted by the admin reply form
#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    /// Ticket id the reply belongs to
    pub id: i64,
    /// Reply text
    pub content: String,
}

/// Shared state for the reply endpoint
#[derive(Clone)]
pub struct ReplyState {
    pub tickets: Arc<TicketService>,
}

/// Build reply routes
pub fn routes(tickets: Arc<TicketService>) -> Router {
    Router::new()
        .route("/", post(submit_reply))
        .with_state(ReplyState { tickets })
}

/// Store an agent reply and forward it to the customer
pub async fn submit_reply(
    State(state): State<ReplyState>,
    Form(reply): Form<ReplyForm>,
) -> Result<Response, ApiError> {
    match state.tickets.reply(reply.id, &reply.content).await {
        Ok(()) => Ok(Redirect::to("/admin").into_response()),
        Err(TicketError::NotFound { .. }) => Ok("Ticket does not exist!".into_response()),
        Err(e) => Err(ApiError::from_ticket(e)),
    }
}

//! Inbound SMS webhook endpoint
//!
//! The SMS provider posts every incoming message here as an
//! `application/x-www-form-urlencoded` body. The provider ignores the
//! response body but retries delivery on non-2xx status codes, so storage
//! failures must surface as errors while everything else answers 200.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Form, Router};
use serde::{Deserialize, Serialize};

use crate::api::types::ApiError;
use crate::domain::tickets::TicketService;
use crate::utils::debug::write_debug;

/// Form fields delivered by the SMS provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundSms {
    /// Sender phone number
    pub originator: String,
    /// Message text
    pub payload: String,
}

/// Shared state for the webhook endpoint
#[derive(Clone)]
pub struct WebhookState {
    pub tickets: Arc<TicketService>,
    pub debug_path: Option<PathBuf>,
}

/// Build webhook routes
pub fn routes(tickets: Arc<TicketService>, debug_path: Option<PathBuf>) -> Router {
    let state = WebhookState {
        tickets,
        debug_path,
    };

    Router::new().route("/", post(receive_sms)).with_state(state)
}

/// Receive an inbound SMS and file it into a ticket
pub async fn receive_sms(
    State(state): State<WebhookState>,
    Form(sms): Form<InboundSms>,
) -> Result<&'static str, ApiError> {
    // Capture raw webhook data in debug mode
    if let Some(ref debug_path) = state.debug_path {
        write_debug(debug_path, "webhook.jsonl", &sms).await;
    }

    state
        .tickets
        .ingest_inbound(&sms.originator, &sms.payload)
        .await
        .map_err(ApiError::from_ticket)?;

    Ok("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::ticket;
    use crate::data::sqlite::{SqlitePool, SqliteService, schema};
    use crate::domain::sms::NoopSender;

    async fn setup_state() -> (WebhookState, SqlitePool) {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(schema::SCHEMA).execute(&pool).await.unwrap();
        let database = Arc::new(SqliteService::from_pool(pool.clone()));
        let tickets = Arc::new(TicketService::new(database, Arc::new(NoopSender)));

        let state = WebhookState {
            tickets,
            debug_path: None,
        };
        (state, pool)
    }

    #[tokio::test]
    async fn test_receive_sms_answers_ok() {
        let (state, pool) = setup_state().await;
        let form = Form(InboundSms {
            originator: "+15551234567".to_string(),
            payload: "My order never arrived".to_string(),
        });

        let body = receive_sms(State(state), form).await.unwrap();
        assert_eq!(body, "OK");

        let ticket = ticket::get_ticket(&pool, 1).await.unwrap().unwrap();
        assert_eq!(ticket.number, "+15551234567");
    }

    #[tokio::test]
    async fn test_repeat_sender_keeps_answering_ok() {
        let (state, _pool) = setup_state().await;

        for text in ["first", "second", "third"] {
            let form = Form(InboundSms {
                originator: "+15551234567".to_string(),
                payload: text.to_string(),
            });
            let body = receive_sms(State(state.clone()), form).await.unwrap();
            assert_eq!(body, "OK");
        }
    }
}

//! Ticket workflows for the SMS help desk
//!
//! - Webhook ingestion: find or create the open ticket for a sender,
//!   append the inbound message, confirm new tickets by SMS
//! - Agent replies: append outbound messages and forward them by SMS
//! - Admin projection: open tickets grouped with their message threads
//!
//! Storage failures propagate to the caller. SMS delivery failures are
//! logged and swallowed: the ticket state is the source of truth, and a
//! visible webhook failure would trigger provider-side redelivery.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::data::SqliteService;
use crate::data::sqlite::{SqliteError, repositories};
use crate::data::types::{MessageDirection, ThreadMessage, ThreadRow, TicketRow, TicketThread};
use crate::domain::sms::SmsSender;

#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Storage error: {0}")]
    Storage(#[from] SqliteError),

    #[error("Ticket {id} does not exist")]
    NotFound { id: i64 },
}

/// Body of the confirmation SMS sent when a new ticket is opened
fn confirmation_body(ticket_id: i64) -> String {
    format!(
        "Thanks for contacting customer support! Your ticket ID is {}.",
        ticket_id
    )
}

/// Ticket and message workflow service
///
/// Owns the storage handle and the outbound SMS sender; handlers reach
/// it through router state.
pub struct TicketService {
    database: Arc<SqliteService>,
    sms: Arc<dyn SmsSender>,
}

impl TicketService {
    pub fn new(database: Arc<SqliteService>, sms: Arc<dyn SmsSender>) -> Self {
        Self { database, sms }
    }

    /// Ingest an inbound SMS delivered by the provider webhook.
    ///
    /// Appends the message to the sender's open ticket, creating the
    /// ticket first if none exists. Newly opened tickets are confirmed
    /// with an SMS carrying the ticket id; repeat messages are not.
    pub async fn ingest_inbound(
        &self,
        originator: &str,
        payload: &str,
    ) -> Result<TicketRow, TicketError> {
        let pool = self.database.pool();

        let (ticket, created) = repositories::find_or_create_open(pool, originator).await?;
        repositories::append_message(pool, ticket.id, MessageDirection::In, payload).await?;

        if created {
            tracing::info!(ticket_id = ticket.id, number = %ticket.number, "Opened new ticket");
            let body = confirmation_body(ticket.id);
            if let Err(e) = self.sms.send(originator, &body).await {
                tracing::warn!(
                    ticket_id = ticket.id,
                    error = %e,
                    "Failed to send ticket confirmation"
                );
            }
        } else {
            tracing::debug!(ticket_id = ticket.id, "Appended message to existing ticket");
        }

        Ok(ticket)
    }

    /// Append an agent reply to a ticket and forward it by SMS.
    ///
    /// The lookup is by bare id, so replies reach closed tickets too.
    /// The reply is stored regardless of the delivery outcome.
    pub async fn reply(&self, id: i64, content: &str) -> Result<(), TicketError> {
        let pool = self.database.pool();

        let ticket = repositories::get_ticket(pool, id)
            .await?
            .ok_or(TicketError::NotFound { id })?;

        repositories::append_message(pool, ticket.id, MessageDirection::Out, content).await?;

        if let Err(e) = self.sms.send(&ticket.number, content).await {
            tracing::warn!(ticket_id = ticket.id, error = %e, "Failed to deliver reply");
        }

        Ok(())
    }

    /// Open tickets with their full message threads, for the admin view
    pub async fn open_threads(&self) -> Result<Vec<TicketThread>, TicketError> {
        let rows = repositories::open_thread_rows(self.database.pool()).await?;
        Ok(group_thread_rows(rows))
    }
}

/// Group joined rows into per-ticket threads, preserving both the
/// first-seen ticket order and the per-ticket message order.
fn group_thread_rows(rows: Vec<ThreadRow>) -> Vec<TicketThread> {
    let mut threads: Vec<TicketThread> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let message = ThreadMessage {
            direction: row.direction,
            content: row.content,
        };
        match index.get(&row.ticket_id) {
            Some(&i) => threads[i].messages.push(message),
            None => {
                index.insert(row.ticket_id, threads.len());
                threads.push(TicketThread {
                    id: row.ticket_id,
                    number: row.number,
                    messages: vec![message],
                });
            }
        }
    }

    threads
}

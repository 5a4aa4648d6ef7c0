//! Shared data types for the storage layer

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// ============================================================================
// Message types
// ============================================================================

/// Direction of a message relative to the help desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    /// Received from a customer via the SMS webhook
    In,
    /// Sent by an agent through the reply form
    Out,
}

impl MessageDirection {
    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for MessageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRow {
    pub id: i64,
    pub ticket_id: i64,
    pub direction: MessageDirection,
    pub content: String,
}

// ============================================================================
// Ticket types
// ============================================================================

/// Ticket row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRow {
    pub id: i64,
    pub number: String,
    pub open: bool,
}

/// One row of the open-ticket join: a single message with its owning ticket.
/// Tickets without messages never produce a row.
#[derive(Debug, Clone)]
pub struct ThreadRow {
    pub ticket_id: i64,
    pub number: String,
    pub direction: MessageDirection,
    pub content: String,
}

/// An open ticket with its full message history, as shown in the admin view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketThread {
    pub id: i64,
    pub number: String,
    pub messages: Vec<ThreadMessage>,
}

/// A single message within a ticket thread
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThreadMessage {
    pub direction: MessageDirection,
    pub content: String,
}

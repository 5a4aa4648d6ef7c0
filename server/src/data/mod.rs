//! Data storage layer
//!
//! Provides database services for the application:
//! - `sqlite` - Transactional database for tickets and messages
//! - `types` - Shared data types

pub mod sqlite;
pub mod types;

// Re-export the backend service
pub use sqlite::SqliteService;

// Re-export shared types for convenient access
pub use types::{MessageDirection, MessageRow, ThreadMessage, ThreadRow, TicketRow, TicketThread};

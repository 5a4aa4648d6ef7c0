//! SQLite repositories
//!
//! Types (TicketRow, MessageRow, etc.) should be imported from `crate::data::types`.

pub mod message;
pub mod ticket;

pub use message::{append_message, list_for_ticket, open_thread_rows};
pub use ticket::{find_or_create_open, get_ticket};

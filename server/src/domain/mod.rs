//! Domain logic for the SMS help desk
//!
//! - `sms` - Outbound SMS delivery client
//! - `tickets` - Ticket and message workflows

pub mod sms;
pub mod tickets;

pub use sms::{SmsError, SmsSender};
pub use tickets::{TicketError, TicketService};

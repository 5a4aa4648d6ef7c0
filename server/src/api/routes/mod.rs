//! API route handlers

pub mod health;
pub mod reply;
pub mod tickets;
pub mod webhook;

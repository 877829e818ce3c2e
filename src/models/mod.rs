//! Data models for ticket records.

pub mod ticket;

pub use ticket::{Ticket, TicketDraft, TicketId, TicketStatus};

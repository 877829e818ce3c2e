//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! the ticket cache and the repository. They provide a clean boundary between
//! the HTTP handlers and the data access layer.

mod ticket_service;

pub use ticket_service::{TicketService, TicketServiceImpl};

mod in_memory_ticket_repository;
mod traits;

pub use in_memory_ticket_repository::InMemoryTicketRepository;
pub use traits::TicketRepository;

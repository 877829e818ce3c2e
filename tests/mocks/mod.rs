mod mock_ticket_repository;

pub use mock_ticket_repository::MockTicketRepository;

use crate::error::TicketResult;
use crate::models::{Ticket, TicketDraft, TicketId};
use async_trait::async_trait;

/// Repository for managing tickets.
///
/// The persistence layer and source of truth behind the ticket cache,
/// enabling different implementations (in-memory, database, mock).
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Persist a new ticket and return it with its assigned id.
    async fn create(&self, draft: &TicketDraft) -> TicketResult<Ticket>;

    /// Retrieve every ticket, ordered by id.
    async fn list(&self) -> TicketResult<Vec<Ticket>>;

    /// Retrieve a single ticket by id.
    async fn get(&self, id: TicketId) -> TicketResult<Ticket>;

    /// Replace the mutable fields of an existing ticket.
    async fn update(&self, id: TicketId, draft: &TicketDraft) -> TicketResult<Ticket>;

    /// Delete a ticket.
    async fn delete(&self, id: TicketId) -> TicketResult<()>;
}

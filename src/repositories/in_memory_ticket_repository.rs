use crate::error::{TicketError, TicketResult};
use crate::models::{Ticket, TicketDraft, TicketId};
use crate::repositories::traits::TicketRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Ticket repository backed by an ordered in-process map.
///
/// Ids are assigned from a counter starting at 1 and are never reused,
/// even after a delete.
pub struct InMemoryTicketRepository {
    tickets: RwLock<BTreeMap<TicketId, Ticket>>,
    next_id: AtomicI64,
}

impl InMemoryTicketRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            tickets: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a repository pre-loaded with tickets.
    ///
    /// The id counter continues after the largest seeded id.
    pub fn with_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        let tickets: BTreeMap<TicketId, Ticket> = tickets.into_iter().map(|t| (t.id, t)).collect();
        let next_id = tickets.keys().next_back().map_or(1, |max| max + 1);

        Self {
            tickets: RwLock::new(tickets),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryTicketRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn create(&self, draft: &TicketDraft) -> TicketResult<Ticket> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let ticket = Ticket::from_draft(id, draft, Utc::now());

        self.tickets.write().await.insert(id, ticket.clone());
        debug!(id, "Stored new ticket");
        Ok(ticket)
    }

    async fn list(&self) -> TicketResult<Vec<Ticket>> {
        Ok(self.tickets.read().await.values().cloned().collect())
    }

    async fn get(&self, id: TicketId) -> TicketResult<Ticket> {
        self.tickets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TicketError::NotFound(id))
    }

    async fn update(&self, id: TicketId, draft: &TicketDraft) -> TicketResult<Ticket> {
        let mut tickets = self.tickets.write().await;
        let ticket = tickets.get_mut(&id).ok_or(TicketError::NotFound(id))?;
        ticket.apply(draft, Utc::now());
        Ok(ticket.clone())
    }

    async fn delete(&self, id: TicketId) -> TicketResult<()> {
        self.tickets
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(TicketError::NotFound(id))
    }
}

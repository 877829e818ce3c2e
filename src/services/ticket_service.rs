//! Ticket service layer.
//!
//! Reads consult the cache first and fill it from the repository on a miss.
//! Writes go to the repository and then invalidate whatever they made stale.
//! A fill whose repository read raced a write is dropped, not stored.

use crate::cache::TicketCache;
use crate::error::{TicketError, TicketResult};
use crate::models::{Ticket, TicketDraft, TicketId};
use crate::repositories::TicketRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Ticket service trait for business operations.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Create a ticket from a draft.
    async fn create_ticket(&self, draft: TicketDraft) -> TicketResult<Ticket>;

    /// List every ticket.
    async fn get_all_tickets(&self) -> TicketResult<Vec<Ticket>>;

    /// Get a single ticket.
    async fn get_ticket(&self, id: TicketId) -> TicketResult<Ticket>;

    /// Replace an existing ticket's fields.
    async fn update_ticket(&self, id: TicketId, draft: TicketDraft) -> TicketResult<Ticket>;

    /// Delete a ticket.
    async fn delete_ticket(&self, id: TicketId) -> TicketResult<()>;
}

/// Default implementation of TicketService.
pub struct TicketServiceImpl {
    repo: Arc<dyn TicketRepository>,
    cache: Arc<TicketCache>,
}

/// Validation helper functions.
impl TicketServiceImpl {
    /// Validate a create/update draft.
    fn validate_draft(draft: &TicketDraft) -> Result<(), String> {
        if draft.title.trim().is_empty() {
            return Err("Ticket title cannot be empty".to_string());
        }
        if draft.title.chars().count() > MAX_TITLE_LEN {
            return Err(format!(
                "Ticket title too long (max {} characters)",
                MAX_TITLE_LEN
            ));
        }
        if draft.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(format!(
                "Ticket description too long (max {} characters)",
                MAX_DESCRIPTION_LEN
            ));
        }
        Ok(())
    }
}

impl TicketServiceImpl {
    /// Create a new ticket service over a repository and a shared cache.
    pub fn new(repo: Arc<dyn TicketRepository>, cache: Arc<TicketCache>) -> Self {
        Self { repo, cache }
    }
}

#[async_trait]
impl TicketService for TicketServiceImpl {
    async fn create_ticket(&self, draft: TicketDraft) -> TicketResult<Ticket> {
        Self::validate_draft(&draft).map_err(TicketError::InvalidRequest)?;

        let ticket = self.repo.create(&draft).await?;
        self.cache.invalidate_all();

        info!(id = ticket.id, "Created ticket");
        Ok(ticket)
    }

    async fn get_all_tickets(&self) -> TicketResult<Vec<Ticket>> {
        if let Some(tickets) = self.cache.get_all() {
            return Ok(tickets);
        }

        let generation = self.cache.generation();
        let tickets = self.repo.list().await?;
        self.cache.set_all_if_current(tickets.clone(), generation);

        debug!(count = tickets.len(), "Loaded ticket list from storage");
        Ok(tickets)
    }

    async fn get_ticket(&self, id: TicketId) -> TicketResult<Ticket> {
        if let Some(ticket) = self.cache.get(id) {
            return Ok(ticket);
        }

        let generation = self.cache.generation();
        let ticket = self.repo.get(id).await?;
        self.cache.set_if_current(id, ticket.clone(), generation);

        debug!(id, "Loaded ticket from storage");
        Ok(ticket)
    }

    async fn update_ticket(&self, id: TicketId, draft: TicketDraft) -> TicketResult<Ticket> {
        Self::validate_draft(&draft).map_err(TicketError::InvalidRequest)?;

        let ticket = self.repo.update(id, &draft).await?;
        self.cache.invalidate(id);
        self.cache.invalidate_all();

        info!(id, "Updated ticket");
        Ok(ticket)
    }

    async fn delete_ticket(&self, id: TicketId) -> TicketResult<()> {
        self.repo.delete(id).await?;
        self.cache.invalidate(id);
        self.cache.invalidate_all();

        info!(id, "Deleted ticket");
        Ok(())
    }
}

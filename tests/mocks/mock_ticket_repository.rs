use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use ticket_service::error::{TicketError, TicketResult};
use ticket_service::models::{Ticket, TicketDraft, TicketId};
use ticket_service::repositories::TicketRepository;

/// Mock ticket repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockTicketRepository {
    tickets: Arc<Mutex<BTreeMap<TicketId, Ticket>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_id: Arc<AtomicI64>,
    fail_storage: Arc<AtomicBool>,
    list_delay: Arc<Mutex<Option<Duration>>>,
    get_delay: Arc<Mutex<Option<Duration>>>,
}

#[allow(dead_code)]
impl MockTicketRepository {
    pub fn new() -> Self {
        Self {
            tickets: Arc::new(Mutex::new(BTreeMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            fail_storage: Arc::new(AtomicBool::new(false)),
            list_delay: Arc::new(Mutex::new(None)),
            get_delay: Arc::new(Mutex::new(None)),
        }
    }

    pub fn add_ticket(&self, id: TicketId, title: &str) -> Ticket {
        let ticket = Ticket::from_draft(id, &TicketDraft::new(title), Utc::now());
        self.tickets.lock().unwrap().insert(id, ticket.clone());
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
        ticket
    }

    /// Overwrite a stored ticket behind the cache's back.
    pub fn rename_directly(&self, id: TicketId, title: &str) {
        if let Some(ticket) = self.tickets.lock().unwrap().get_mut(&id) {
            ticket.title = title.to_string();
        }
    }

    /// Make every subsequent call fail with a storage error.
    pub fn fail_with_storage_error(&self) {
        self.fail_storage.store(true, Ordering::SeqCst);
    }

    /// Make `list` sleep before answering. The answer is read before the sleep.
    pub fn delay_list(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    /// Make `get` sleep before answering. The answer is read before the sleep.
    pub fn delay_get(&self, delay: Duration) {
        *self.get_delay.lock().unwrap() = Some(delay);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> TicketResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.fail_storage.load(Ordering::SeqCst) {
            return Err(TicketError::Storage("mock storage unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for MockTicketRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
    async fn create(&self, draft: &TicketDraft) -> TicketResult<Ticket> {
        self.track_call("create")?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let ticket = Ticket::from_draft(id, draft, Utc::now());
        self.tickets.lock().unwrap().insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn list(&self) -> TicketResult<Vec<Ticket>> {
        self.track_call("list")?;

        let tickets: Vec<Ticket> = self.tickets.lock().unwrap().values().cloned().collect();
        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(tickets)
    }

    async fn get(&self, id: TicketId) -> TicketResult<Ticket> {
        self.track_call("get")?;

        let ticket = self.tickets.lock().unwrap().get(&id).cloned();
        let delay = *self.get_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        ticket.ok_or(TicketError::NotFound(id))
    }

    async fn update(&self, id: TicketId, draft: &TicketDraft) -> TicketResult<Ticket> {
        self.track_call("update")?;

        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets.get_mut(&id).ok_or(TicketError::NotFound(id))?;
        ticket.apply(draft, Utc::now());
        Ok(ticket.clone())
    }

    async fn delete(&self, id: TicketId) -> TicketResult<()> {
        self.track_call("delete")?;

        self.tickets
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(TicketError::NotFound(id))
    }
}

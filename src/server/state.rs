use crate::auth::Authorizer;
use crate::services::TicketService;
use std::sync::Arc;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<dyn TicketService>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(tickets: Arc<dyn TicketService>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            tickets,
            authorizer,
        }
    }
}

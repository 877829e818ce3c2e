//! Ticket model and the client-supplied draft used to create or replace one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Integer identifier assigned by the persistence layer.
pub type TicketId = i64;

/// Workflow state of a ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

/// A ticket record as stored by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Short summary
    pub title: String,

    /// Free-form details
    #[serde(default)]
    pub description: String,

    /// Current workflow state
    #[serde(default)]
    pub status: TicketStatus,

    /// When the ticket was created
    pub created_at: DateTime<Utc>,

    /// When the ticket was last replaced
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /tickets` and `PUT /ticket/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TicketDraft {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: TicketStatus,
}

impl TicketDraft {
    /// Create a draft with only a title; description is empty and status is `open`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style setter for the status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }
}

impl Ticket {
    /// Materialize a draft into a stored ticket with the given id.
    pub fn from_draft(id: TicketId, draft: &TicketDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields with those of `draft`, keeping id and creation time.
    pub fn apply(&mut self, draft: &TicketDraft, now: DateTime<Utc>) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.status = draft.status;
        self.updated_at = now;
    }
}

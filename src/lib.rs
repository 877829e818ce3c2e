//! Ticket Service - a small HTTP CRUD service for ticket records.
//!
//! Reads are served from a time-bounded in-memory cache when fresh and fall
//! back to the persistence layer otherwise; writes invalidate the cache.
//!
//! # Architecture
//!
//! - **models**: Ticket records and drafts
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **cache**: TTL cache primitives and the process-wide ticket cache
//! - **repositories**: Persistence layer abstraction and in-memory store
//! - **services**: Cache-aware ticket operations
//! - **auth**: Request authorization
//! - **server**: axum router, handlers and lifecycle

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use auth::{Authorizer, BearerTokenAuthorizer};
pub use cache::{TicketCache, TimedCache, TimedSlot};
pub use config::Config;
pub use error::{ConfigError, TicketError, TicketResult};
pub use models::{Ticket, TicketDraft, TicketId, TicketStatus};
pub use repositories::{InMemoryTicketRepository, TicketRepository};
pub use server::{build_router, AppState};
pub use services::{TicketService, TicketServiceImpl};

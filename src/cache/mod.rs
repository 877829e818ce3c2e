//! Caching for the ticket service.
//!
//! `timed_cache` provides the generic TTL primitives; `ticket_cache` builds the
//! process-wide ticket cache on top of them.

pub mod ticket_cache;
pub mod timed_cache;

pub use ticket_cache::{spawn_init, spawn_sweeper, TicketCache};
pub use timed_cache::{TimedCache, TimedSlot};

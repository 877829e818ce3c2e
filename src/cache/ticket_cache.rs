//! Process-wide ticket cache.
//!
//! Holds per-id ticket snapshots and an "all tickets" snapshot, each expiring
//! after the same fixed TTL. The two are independent: a list read may be
//! served from a snapshot taken before a per-id entry was refreshed, and
//! vice versa. Staleness is bounded by the TTL.
//!
//! Population happens once, in the background, after startup. Requests that
//! arrive first see misses and read from the repository directly.
//!
//! Fills that read the repository before a concurrent write must not land
//! after that write's invalidation. Every invalidation bumps a generation
//! counter; a fill captures it with [`TicketCache::generation`] before its
//! repository call and stores only if it is unchanged.

use super::timed_cache::{TimedCache, TimedSlot};
use crate::models::{Ticket, TicketId};
use crate::repositories::TicketRepository;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Time-windowed cache of ticket records.
pub struct TicketCache {
    entries: TimedCache<TicketId, Ticket>,
    all: TimedSlot<Vec<Ticket>>,
    // Held across compare-and-store and bump-and-remove.
    generation: Mutex<u64>,
    init_claimed: AtomicBool,
    initialized: AtomicBool,
}

impl TicketCache {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: TimedCache::new(ttl),
            all: TimedSlot::new(ttl),
            generation: Mutex::new(0),
            init_claimed: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
        }
    }

    /// Populate the cache from the repository.
    ///
    /// Only the first caller runs the population; every other call, whether
    /// concurrent or later, returns `false` immediately without waiting. A
    /// failed population leaves the cache empty and is not retried, and so
    /// does one overtaken by an invalidation while the list was loading.
    pub async fn init(&self, repo: &dyn TicketRepository) -> bool {
        if self
            .init_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Ticket cache population already claimed");
            return false;
        }

        let generation = self.generation();
        match repo.list().await {
            Ok(tickets) => {
                let guard = self.lock_generation();
                if *guard == generation {
                    for ticket in &tickets {
                        self.entries.insert(ticket.id, ticket.clone());
                    }
                    info!(count = tickets.len(), "Ticket cache populated");
                    self.all.store(tickets);
                } else {
                    info!("Ticket cache population skipped, a write invalidated it meanwhile");
                }
            }
            Err(e) => {
                warn!(error = %e, "Ticket cache population failed, reads fall through to storage");
            }
        }

        self.initialized.store(true, Ordering::Release);
        true
    }

    /// Whether population has finished (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Cached ticket for `id`, or `None` if absent or expired.
    pub fn get(&self, id: TicketId) -> Option<Ticket> {
        let hit = self.entries.get(&id);
        debug!(id, hit = hit.is_some(), "Ticket cache lookup");
        hit
    }

    /// Cached full ticket list, or `None` if absent or expired.
    pub fn get_all(&self) -> Option<Vec<Ticket>> {
        let hit = self.all.load();
        debug!(hit = hit.is_some(), "Ticket list cache lookup");
        hit
    }

    /// Store a ticket under `id`, restarting its TTL.
    pub fn set(&self, id: TicketId, ticket: Ticket) {
        self.entries.insert(id, ticket);
    }

    /// Store the full ticket list, restarting its TTL.
    pub fn set_all(&self, tickets: Vec<Ticket>) {
        self.all.store(tickets);
    }

    /// Store a ticket under `id` unless an invalidation happened since
    /// `generation` was read. Returns whether it was stored.
    pub fn set_if_current(&self, id: TicketId, ticket: Ticket, generation: u64) -> bool {
        let guard = self.lock_generation();
        let current = *guard == generation;
        if current {
            self.entries.insert(id, ticket);
        }
        current
    }

    /// Store the full ticket list unless an invalidation happened since
    /// `generation` was read. Returns whether it was stored.
    pub fn set_all_if_current(&self, tickets: Vec<Ticket>, generation: u64) -> bool {
        let guard = self.lock_generation();
        let current = *guard == generation;
        if current {
            self.all.store(tickets);
        }
        current
    }

    /// Drop the entry for `id`.
    pub fn invalidate(&self, id: TicketId) {
        let mut guard = self.lock_generation();
        *guard = guard.wrapping_add(1);
        self.entries.remove(&id);
    }

    /// Drop the full-list snapshot. Per-id entries are untouched.
    pub fn invalidate_all(&self) {
        let mut guard = self.lock_generation();
        *guard = guard.wrapping_add(1);
        self.all.clear();
    }

    /// Current invalidation generation, for use with the `*_if_current` setters.
    pub fn generation(&self) -> u64 {
        *self.lock_generation()
    }

    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        // The counter is a plain integer, always valid after a panic.
        self.generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop expired per-id entries and an expired list snapshot.
    ///
    /// Returns the number of values released.
    pub fn purge_expired(&self) -> usize {
        let purged = self.entries.cleanup_expired();
        purged + usize::from(self.all.cleanup_expired())
    }

    /// Number of per-id entries held, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no per-id entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fixed time-to-live of every entry.
    pub fn ttl(&self) -> Duration {
        self.entries.ttl()
    }
}

impl std::fmt::Debug for TicketCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketCache")
            .field("ttl", &self.ttl())
            .field("entries", &self.len())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Launch population as a fire-and-forget task.
///
/// Request handling may start before the task finishes.
pub fn spawn_init(cache: Arc<TicketCache>, repo: Arc<dyn TicketRepository>) -> JoinHandle<()> {
    tokio::spawn(async move {
        cache.init(repo.as_ref()).await;
    })
}

/// Periodically release expired entries for the rest of the process lifetime.
pub fn spawn_sweeper(cache: Arc<TicketCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                debug!(purged, "Swept expired ticket cache entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketDraft;
    use crate::repositories::InMemoryTicketRepository;
    use chrono::Utc;

    const MINUTE: Duration = Duration::from_secs(60);

    fn ticket(id: TicketId, title: &str) -> Ticket {
        Ticket::from_draft(id, &TicketDraft::new(title), Utc::now())
    }

    #[test]
    fn test_set_then_get() {
        let cache = TicketCache::new(MINUTE);
        cache.set(1, ticket(1, "a"));

        assert_eq!(cache.get(1).map(|t| t.title), Some("a".to_string()));
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let cache = TicketCache::new(MINUTE);
        cache.set(1, ticket(1, "a"));
        cache.invalidate(1);

        assert!(cache.get(1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_all_only_clears_snapshot() {
        let cache = TicketCache::new(MINUTE);
        cache.set(1, ticket(1, "a"));
        cache.set_all(vec![ticket(1, "a")]);

        cache.invalidate_all();

        assert!(cache.get_all().is_none());
        assert!(cache.get(1).is_some());
    }

    #[test]
    fn test_fill_skipped_after_invalidation() {
        let cache = TicketCache::new(MINUTE);
        let generation = cache.generation();

        cache.invalidate(1);

        assert!(!cache.set_if_current(1, ticket(1, "old"), generation));
        assert!(!cache.set_all_if_current(vec![ticket(1, "old")], generation));
        assert!(cache.get(1).is_none());
        assert!(cache.get_all().is_none());

        let generation = cache.generation();
        assert!(cache.set_if_current(1, ticket(1, "new"), generation));
        assert!(cache.set_all_if_current(vec![ticket(1, "new")], generation));
        assert_eq!(cache.get(1).map(|t| t.title), Some("new".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_expires() {
        let cache = TicketCache::new(MINUTE);
        cache.set_all(vec![ticket(1, "a"), ticket(2, "b")]);

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get_all().map(|all| all.len()), Some(2));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get_all().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_counts_entries_and_snapshot() {
        let cache = TicketCache::new(MINUTE);
        cache.set(1, ticket(1, "a"));
        cache.set(2, ticket(2, "b"));
        cache.set_all(vec![ticket(1, "a"), ticket(2, "b")]);

        assert_eq!(cache.purge_expired(), 0);

        tokio::time::advance(MINUTE).await;
        assert_eq!(cache.purge_expired(), 3);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_init_populates_once() {
        let repo = InMemoryTicketRepository::with_tickets(vec![ticket(1, "a"), ticket(2, "b")]);
        let cache = TicketCache::new(MINUTE);
        assert!(!cache.is_initialized());

        assert!(cache.init(&repo).await);
        assert!(cache.is_initialized());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_all().map(|all| all.len()), Some(2));

        // A later create is not picked up by a second init
        repo.create(&TicketDraft::new("c")).await.unwrap();
        assert!(!cache.init(&repo).await);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_spawn_init_completes() {
        let repo: Arc<dyn TicketRepository> =
            Arc::new(InMemoryTicketRepository::with_tickets(vec![ticket(3, "c")]));
        let cache = Arc::new(TicketCache::new(MINUTE));

        spawn_init(cache.clone(), repo).await.unwrap();

        assert!(cache.is_initialized());
        assert_eq!(cache.get(3).map(|t| t.id), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_releases_expired_entries() {
        let cache = Arc::new(TicketCache::new(Duration::from_secs(10)));
        cache.set(1, ticket(1, "a"));

        let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(5));

        // Paused clock auto-advances through the sweeper's ticks
        tokio::time::sleep(Duration::from_secs(16)).await;
        assert!(cache.is_empty());

        sweeper.abort();
    }

    #[test]
    fn test_debug_format() {
        let cache = TicketCache::new(MINUTE);
        let debug_str = format!("{:?}", cache);
        assert!(debug_str.contains("TicketCache"));
        assert!(debug_str.contains("initialized"));
    }
}

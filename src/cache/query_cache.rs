// src/cache/query_cache.rs
//
// Query Cache
//
// DESIGN PRINCIPLES:
// 1. Fresh entries are served without calling the loader
// 2. At most one loader runs per key at any time; concurrent callers share it
// 3. Loaders run in their own task, so a caller that stops waiting never
//    leaves an entry stuck in `Pending`
// 4. The entry map lock is never held across an await

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::cache::key::{KeyPrefix, RequestKey};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Read-only view of one cache entry
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: RequestKey,
    pub data: Option<V>,
    pub fetched_at: Option<Instant>,
    pub status: CacheStatus,
    pub error: Option<AppError>,
}

impl<V> CacheEntry<V> {
    /// Fresh iff the last fetch succeeded less than `staleness` ago
    pub fn is_fresh(&self, now: Instant, staleness: Duration) -> bool {
        self.status == CacheStatus::Success
            && self
                .fetched_at
                .map_or(false, |at| now.saturating_duration_since(at) < staleness)
    }
}

type Settled<V> = Option<AppResult<V>>;

struct Slot<V> {
    entry: CacheEntry<V>,
    inflight: Option<watch::Receiver<Settled<V>>>,
    /// Bumped whenever the slot is overwritten, so a late loader does not
    /// clobber a newer write
    generation: u64,
}

impl<V> Slot<V> {
    fn idle(key: RequestKey) -> Self {
        Self {
            entry: CacheEntry {
                key,
                data: None,
                fetched_at: None,
                status: CacheStatus::Idle,
                error: None,
            },
            inflight: None,
            generation: 0,
        }
    }

    /// A pending slot whose loader task died without reporting
    fn is_orphaned(&self) -> bool {
        self.inflight
            .as_ref()
            .map_or(true, |rx| rx.has_changed().is_err())
    }
}

/// Keyed request/response cache with staleness windows and in-flight
/// de-duplication.
pub struct QueryCache<V> {
    slots: Arc<Mutex<HashMap<RequestKey, Slot<V>>>>,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RequestKey, Slot<V>>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resolve `key`, invoking `loader` only when there is no fresh data and
    /// no fetch already in flight for the same key.
    pub async fn fetch<F, Fut>(&self, key: RequestKey, staleness: Duration, loader: F) -> AppResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<V>> + Send + 'static,
    {
        let mut rx = {
            let mut slots = self.lock();
            let slot = slots
                .entry(key.clone())
                .or_insert_with(|| Slot::idle(key.clone()));

            if slot.entry.is_fresh(Instant::now(), staleness) {
                if let Some(data) = slot.entry.data.clone() {
                    debug!("cache hit: {}", key);
                    return Ok(data);
                }
            }

            match slot.inflight.clone() {
                Some(rx) if slot.entry.status == CacheStatus::Pending && !slot.is_orphaned() => {
                    debug!("joining in-flight request: {}", key);
                    rx
                }
                _ => {
                    debug!("cache miss: {}", key);
                    let (tx, rx) = watch::channel(None);
                    slot.entry.status = CacheStatus::Pending;
                    slot.inflight = Some(rx.clone());
                    slot.generation += 1;

                    let generation = slot.generation;
                    let slots = Arc::clone(&self.slots);
                    let task_key = key.clone();
                    let pending = loader();

                    tokio::spawn(async move {
                        let result = pending.await;
                        {
                            let mut slots =
                                slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                            if let Some(slot) = slots.get_mut(&task_key) {
                                if slot.generation == generation {
                                    settle(slot, &result);
                                }
                            }
                        }
                        // Waiters may all be gone; that is fine
                        let _ = tx.send(Some(result));
                    });

                    rx
                }
            }
        };

        let settled = rx
            .wait_for(|settled| settled.is_some())
            .await
            .map_err(|_| AppError::Other(format!("Request for {} was abandoned", key)))?;

        settled
            .clone()
            .unwrap_or_else(|| Err(AppError::Other(format!("Request for {} did not settle", key))))
    }

    /// Seed an entry as freshly fetched, e.g. to prefetch before navigating
    pub fn write(&self, key: RequestKey, data: V) {
        let mut slots = self.lock();
        let slot = slots
            .entry(key.clone())
            .or_insert_with(|| Slot::idle(key.clone()));

        slot.generation += 1;
        slot.inflight = None;
        slot.entry.data = Some(data);
        slot.entry.error = None;
        slot.entry.fetched_at = Some(Instant::now());
        slot.entry.status = CacheStatus::Success;
        debug!("cache write: {}", key);
    }

    /// Mark every settled entry matching `prefix` as stale. Data is kept so
    /// callers may still peek at it; the next `fetch` reloads. Entries with a
    /// fetch in flight are left alone.
    pub fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        let mut slots = self.lock();
        let mut count = 0;
        for (key, slot) in slots.iter_mut() {
            if prefix.matches(key) && slot.entry.status != CacheStatus::Pending {
                slot.entry.status = CacheStatus::Idle;
                slot.entry.fetched_at = None;
                count += 1;
            }
        }
        debug!("invalidated {} cache entries", count);
        count
    }

    /// Drop every entry matching `prefix`. In-flight loaders still deliver
    /// to their waiters but no longer populate the cache.
    pub fn remove(&self, prefix: &KeyPrefix) -> usize {
        let mut slots = self.lock();
        let before = slots.len();
        slots.retain(|key, _| !prefix.matches(key));
        before - slots.len()
    }

    pub fn peek(&self, key: &RequestKey) -> Option<CacheEntry<V>> {
        self.lock().get(key).map(|slot| slot.entry.clone())
    }

    pub fn status(&self, key: &RequestKey) -> CacheStatus {
        self.lock()
            .get(key)
            .map_or(CacheStatus::Idle, |slot| slot.entry.status)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

fn settle<V: Clone>(slot: &mut Slot<V>, result: &AppResult<V>) {
    slot.inflight = None;
    slot.entry.fetched_at = Some(Instant::now());
    match result {
        Ok(data) => {
            slot.entry.data = Some(data.clone());
            slot.entry.error = None;
            slot.entry.status = CacheStatus::Success;
        }
        Err(err) => {
            // Previous data stays available to peek at
            slot.entry.error = Some(err.clone());
            slot.entry.status = CacheStatus::Error;
        }
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

// Shared handle, like the event bus
impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

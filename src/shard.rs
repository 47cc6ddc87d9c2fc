//! One partition of the keyspace: lookup table + eviction list + lock.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                             Shard<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │                RwLock<ShardCore<K, V>>                       │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                               │                                      │
//!   │                               ▼                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>          (lookup table)                │   │
//!   │   │     key_a ──────────────┐                                    │   │
//!   │   │     key_b ───────┐      │                                    │   │
//!   │   └──────────────────┼──────┼────────────────────────────────────┘   │
//!   │                      ▼      ▼                                        │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  EvictionList<Entry<K, V>>                                   │   │
//!   │   │  HEAD ─► [key_b] ◄──► [key_a] ◄── TAIL                       │   │
//!   │   │           MRU          LRU                                   │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Guard   | Effect                                          |
//! |------------|---------|-------------------------------------------------|
//! | `set`      | write   | overwrite + promote, or evict LRU then insert   |
//! | `get`      | write   | promote on hit; `NotFound` on miss              |
//! | `remove`   | write   | unlink from table and list                      |
//! | `clear`    | write   | drop every entry                                |
//! | `peek`     | read    | no promotion                                    |
//! | `contains` | read    | no promotion                                    |
//!
//! `get` takes the write guard because a hit reorders the eviction list.
//! Evicted and removed values are dropped after the guard is released.
//!
//! ## Invariants
//!
//! - `table.len() == list.len() <= capacity` after every operation
//! - every list node's key maps back to that node's `SlotId` in the table

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::eviction_list::EvictionList;
use crate::ds::slot_arena::SlotId;
use crate::error::{InvariantError, NotFound};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ShardMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider};

/// One cached record, stored in the shard's eviction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Upper bound on the entries a shard reserves room for up front. Larger
/// capacities grow the table and list on demand.
pub const PREALLOC_LIMIT: usize = 4096;

/// Single-threaded LRU state for one shard.
///
/// Thread safety is provided by the owning [`Shard`].
pub struct ShardCore<K, V> {
    table: FxHashMap<K, SlotId>,
    list: EvictionList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: ShardMetrics,
}

impl<K, V> ShardCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty shard holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let reserve = capacity.min(PREALLOC_LIMIT);
        Self {
            table: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            list: EvictionList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: ShardMetrics::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts or overwrites `key`, returning the entry evicted to make room.
    ///
    /// An existing key keeps its slot and is promoted to MRU. A new key on a
    /// full shard first evicts the LRU entry, so `len()` never exceeds
    /// `capacity()`.
    pub fn set(&mut self, key: K, value: V) -> Option<Entry<K, V>> {
        if let Some(&id) = self.table.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            self.list.move_to_front(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return None;
        }

        let evicted = if self.table.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.table.insert(key, id);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        evicted
    }

    /// Looks up `key` and promotes it to MRU on a hit.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(&id) = self.table.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Looks up `key` without touching recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = *self.table.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.table.remove(key)?;
        let entry = self.list.remove(id);
        debug_assert!(entry.is_some(), "table pointed at an unlinked slot");
        #[cfg(feature = "metrics")]
        self.metrics.record_remove();
        entry.map(|entry| entry.value)
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.table.clear();
        self.list.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Removes the LRU entry from both the list and the table.
    fn evict(&mut self) -> Option<Entry<K, V>> {
        let entry = self.list.pop_back()?;
        let removed = self.table.remove(&entry.key);
        debug_assert!(removed.is_some(), "list held a key missing from the table");
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        Some(entry)
    }

    /// Verifies the table and list agree. `shard` labels the error.
    pub fn check_invariants(&self, shard: usize) -> Result<(), InvariantError> {
        if self.table.len() != self.list.len() {
            return Err(InvariantError::new(
                shard,
                format!(
                    "table has {} entries but eviction list has {}",
                    self.table.len(),
                    self.list.len()
                ),
            ));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(
                shard,
                format!(
                    "{} entries exceed capacity {}",
                    self.list.len(),
                    self.capacity
                ),
            ));
        }
        for (id, entry) in self.list.iter() {
            if self.table.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(
                    shard,
                    format!("list slot {} is not indexed by its key", id.index()),
                ));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if let Err(err) = self.check_invariants(0) {
            panic!("{err}");
        }
    }

    /// Keys from MRU to LRU, for tests.
    #[cfg(test)]
    pub(crate) fn keys_mru(&self) -> Vec<K> {
        self.list.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let mut snapshot = self.metrics.snapshot();
        snapshot.cache_len = self.len();
        snapshot.capacity = self.capacity;
        snapshot
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

impl<K, V> fmt::Debug for ShardCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardCore")
            .field("len", &self.table.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// A [`ShardCore`] behind its own `parking_lot::RwLock`.
pub struct Shard<K, V> {
    index: usize,
    inner: RwLock<ShardCore<K, V>>,
}

impl<K, V> Shard<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates shard number `index` with the given capacity.
    pub fn new(index: usize, capacity: usize) -> Self {
        Self {
            index,
            inner: RwLock::new(ShardCore::new(capacity)),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Inserts or overwrites `key` under the write guard.
    pub fn set(&self, key: K, value: V) {
        let evicted = self.inner.write().set(key, value);
        if evicted.is_some() {
            trace!(shard = self.index, "evicted least-recently-used entry");
        }
    }

    /// Returns a clone of the value and promotes `key` to MRU.
    pub fn get<Q>(&self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Runs `f` on the value under the write guard and promotes `key`.
    pub fn get_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Result<R, NotFound>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut core = self.inner.write();
        core.get(key).map(f).ok_or(NotFound)
    }

    /// Returns a clone of the value without promoting `key`.
    pub fn peek<Q>(&self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.inner.read().peek(key).cloned().ok_or(NotFound)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.read().contains(key)
    }

    pub fn remove<Q>(&self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let removed = self.inner.write().remove(key);
        removed.ok_or(NotFound)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
        trace!(shard = self.index, "cleared shard");
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants(self.index)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) {
        self.inner.write().reset_metrics();
    }

    /// Runs `f` with exclusive access to the core, for tests.
    #[cfg(test)]
    pub(crate) fn with_core<R>(&self, f: impl FnOnce(&mut ShardCore<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K, V> fmt::Debug for Shard<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shard")
            .field("index", &self.index)
            .field("core", &*self.inner.read())
            .finish()
    }
}

//! # Sharded LRU Cache
//!
//! The public surface of the crate: a fixed set of independently locked LRU
//! shards, with every call routed to exactly one of them.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                      ShardedLruCache<K, V>                           │
//!   │                                                                      │
//!   │   set(k, v) / get(&k)                                                │
//!   │        │                                                             │
//!   │        ▼                                                             │
//!   │   KeyRouter::route(&k) ── k.shard_hash() % shard_count               │
//!   │        │                                                             │
//!   │        ▼                                                             │
//!   │   ┌──────────┬──────────┬──────────┬──────────┐                      │
//!   │   │ Shard 0  │ Shard 1  │ Shard 2  │ Shard 3  │  Box<[Shard<K, V>]>  │
//!   │   │ RwLock   │ RwLock   │ RwLock   │ RwLock   │                      │
//!   │   │ table    │ table    │ table    │ table    │                      │
//!   │   │ LRU list │ LRU list │ LRU list │ LRU list │                      │
//!   │   └──────────┴──────────┴──────────┴──────────┘                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Each shard holds at most `shard_capacity` entries; a full shard silently
//!   evicts its own least recently used entry.
//! - Operations on one shard are totally ordered by its lock. Operations on
//!   different shards run in parallel with no ordering between them.
//! - Recency is tracked per shard only. The entry evicted from a full shard
//!   may be more recently used than entries living in other shards.
//! - No method ever holds two shard locks at once.
//!
//! ## Example Usage
//!
//! ```
//! use shardkit::ShardedLruCache;
//! use shardkit::error::NotFound;
//!
//! let cache = ShardedLruCache::new(1, 3);
//! cache.set(1, "one");
//! cache.set(2, "two");
//! cache.set(3, "three");
//!
//! cache.set(4, "four");
//! assert_eq!(cache.get(&1), Err(NotFound));
//! assert_eq!(cache.get(&4), Ok("four"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::ds::router::KeyRouter;
use crate::error::{InvariantError, NotFound};
use crate::hash::ShardKey;
use crate::shard::Shard;

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;

/// Per-shard capacity used when a zero capacity is requested.
pub const DEFAULT_SHARD_CAPACITY: usize = 1024;

/// Thread-safe LRU cache partitioned into independently locked shards.
///
/// Share it across threads with `Arc<ShardedLruCache<K, V>>`; every method
/// takes `&self`.
pub struct ShardedLruCache<K, V> {
    shards: Box<[Shard<K, V>]>,
    router: KeyRouter,
    shard_capacity: usize,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: ShardKey + Eq + Clone,
{
    /// Creates a cache with `shard_count` shards of `shard_capacity` entries.
    ///
    /// Never fails: a zero shard count becomes 1 and a zero capacity becomes
    /// [`DEFAULT_SHARD_CAPACITY`]. Use
    /// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build) to
    /// reject those inputs instead.
    ///
    /// ```
    /// use shardkit::{ShardedLruCache, DEFAULT_SHARD_CAPACITY};
    ///
    /// let cache: ShardedLruCache<u64, u64> = ShardedLruCache::new(0, 0);
    /// assert_eq!(cache.shard_count(), 1);
    /// assert_eq!(cache.shard_capacity(), DEFAULT_SHARD_CAPACITY);
    /// ```
    pub fn new(shard_count: usize, shard_capacity: usize) -> Self {
        let shard_count = if shard_count == 0 {
            warn!("shard count 0 requested, using 1");
            1
        } else {
            shard_count
        };
        let shard_capacity = if shard_capacity == 0 {
            warn!(
                default = DEFAULT_SHARD_CAPACITY,
                "shard capacity 0 requested, using default"
            );
            DEFAULT_SHARD_CAPACITY
        } else {
            shard_capacity
        };
        Self::with_validated(shard_count, shard_capacity)
    }

    /// Construction after the inputs are known to be non-zero.
    pub(crate) fn with_validated(shard_count: usize, shard_capacity: usize) -> Self {
        debug_assert!(shard_count > 0 && shard_capacity > 0);
        let shards = (0..shard_count)
            .map(|index| Shard::new(index, shard_capacity))
            .collect();
        debug!(shard_count, shard_capacity, "created sharded LRU cache");
        Self {
            shards,
            router: KeyRouter::new(shard_count),
            shard_capacity,
        }
    }

    /// Inserts or overwrites `key`. May evict the LRU entry of its shard.
    pub fn set(&self, key: K, value: V) {
        self.shard(&key).set(key, value);
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    ///
    /// ```
    /// use shardkit::ShardedLruCache;
    ///
    /// let cache = ShardedLruCache::new(4, 8);
    /// cache.set("a".to_string(), 0);
    ///
    /// // A stored zero is a hit, not a miss.
    /// assert_eq!(cache.get("a"), Ok(0));
    /// assert!(cache.get("b").is_err());
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: ShardKey + Eq + ?Sized,
        V: Clone,
    {
        self.shard(key).get(key)
    }

    /// Runs `f` on the value for `key` under the shard lock and marks it most
    /// recently used. Avoids cloning large values.
    pub fn get_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Result<R, NotFound>
    where
        K: Borrow<Q>,
        Q: ShardKey + Eq + ?Sized,
    {
        self.shard(key).get_with(key, f)
    }

    /// Returns a clone of the value without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: ShardKey + Eq + ?Sized,
        V: Clone,
    {
        self.shard(key).peek(key)
    }

    /// Returns `true` if `key` is cached. Does not change recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ShardKey + Eq + ?Sized,
    {
        self.shard(key).contains(key)
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Result<V, NotFound>
    where
        K: Borrow<Q>,
        Q: ShardKey + Eq + ?Sized,
    {
        self.shard(key).remove(key)
    }

    /// Empties every shard, locking one shard at a time.
    ///
    /// Not atomic across shards: a concurrent `set` may land in a shard that
    /// has already been cleared.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.clear();
        }
    }

    /// Total entries across shards, summed one shard lock at a time.
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(Shard::is_empty)
    }

    /// Total capacity: `shard_count() * shard_capacity()`, saturating at
    /// `usize::MAX`.
    pub fn capacity(&self) -> usize {
        self.shards.len().saturating_mul(self.shard_capacity)
    }

    #[inline]
    pub fn shard_capacity(&self) -> usize {
        self.shard_capacity
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard `key` routes to.
    #[inline]
    pub fn shard_for<Q: ShardKey + ?Sized>(&self, key: &Q) -> usize {
        self.router.route(key)
    }

    /// Number of entries held by shard `index`, or `None` if out of range.
    pub fn shard_len(&self, index: usize) -> Option<usize> {
        self.shards.get(index).map(Shard::len)
    }

    /// Checks every shard's table/list agreement and capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.shards.iter().try_for_each(Shard::check_invariants)
    }

    /// Sum of every shard's counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.shards
            .iter()
            .map(Shard::metrics_snapshot)
            .fold(CacheMetricsSnapshot::default(), |acc, s| acc + s)
    }

    /// Counters for shard `index`, or `None` if out of range.
    #[cfg(feature = "metrics")]
    pub fn shard_metrics(&self, index: usize) -> Option<CacheMetricsSnapshot> {
        self.shards.get(index).map(Shard::metrics_snapshot)
    }

    /// Zeroes every shard's counters. Entries are untouched.
    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) {
        for shard in self.shards.iter() {
            shard.reset_metrics();
        }
    }

    #[inline]
    fn shard<Q: ShardKey + ?Sized>(&self, key: &Q) -> &Shard<K, V> {
        &self.shards[self.router.route(key)]
    }
}

impl<K, V> fmt::Debug for ShardedLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shard_count", &self.shards.len())
            .field("shard_capacity", &self.shard_capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn scenario_single_shard_capacity_three() {
        let cache = ShardedLruCache::new(1, 3);
        cache.set(1, "one");
        cache.set(2, "two");
        cache.set(3, "three");
        assert_eq!(cache.get(&1), Ok("one"));
        assert_eq!(cache.get(&2), Ok("two"));
        assert_eq!(cache.get(&3), Ok("three"));

        cache.set(4, "four");
        assert_eq!(cache.get(&1), Err(NotFound));
        assert_eq!(cache.get(&2), Ok("two"));
        assert_eq!(cache.get(&3), Ok("three"));
        assert_eq!(cache.get(&4), Ok("four"));

        assert_eq!(cache.get(&2), Ok("two"));
        cache.set(5, "five");
        assert_eq!(cache.get(&3), Err(NotFound));
        assert_eq!(cache.get(&2), Ok("two"));
        assert_eq!(cache.get(&4), Ok("four"));
        assert_eq!(cache.get(&5), Ok("five"));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn forgiving_constructor_clamps_zeroes() {
        let cache: ShardedLruCache<u32, u32> = ShardedLruCache::new(0, 0);
        assert_eq!(cache.shard_count(), 1);
        assert_eq!(cache.shard_capacity(), DEFAULT_SHARD_CAPACITY);
        assert_eq!(cache.capacity(), DEFAULT_SHARD_CAPACITY);
    }

    #[test]
    fn unbounded_capacity_constructs_and_serves() {
        let cache: ShardedLruCache<u64, u64> = ShardedLruCache::new(1, usize::MAX);
        assert_eq!(cache.shard_capacity(), usize::MAX);
        cache.set(7, 70);
        assert_eq!(cache.get(&7), Ok(70));
        assert_eq!(cache.get(&8), Err(NotFound));
        assert!(cache.check_invariants().is_ok());

        let wide: ShardedLruCache<u64, u64> = ShardedLruCache::new(4, usize::MAX);
        assert_eq!(wide.capacity(), usize::MAX);
        wide.set(1, 1);
        assert_eq!(wide.peek(&1), Ok(1));
    }

    #[test]
    fn miss_on_empty_cache() {
        let cache: ShardedLruCache<u64, u64> = ShardedLruCache::new(8, 4);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&0), Err(NotFound));
        assert_eq!(cache.peek(&0), Err(NotFound));
        assert_eq!(cache.remove(&0), Err(NotFound));
        assert!(!cache.contains(&0));
    }

    #[test]
    fn overwrite_keeps_len() {
        let cache = ShardedLruCache::new(4, 4);
        cache.set("k", 1);
        cache.set("k", 2);
        assert_eq!(cache.get(&"k"), Ok(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_land_on_routed_shard() {
        let cache = ShardedLruCache::new(4, 16);
        for k in 0u64..16 {
            cache.set(k, k);
        }
        // Integers route by modulo: four keys per shard.
        for shard in 0..4 {
            assert_eq!(cache.shard_len(shard), Some(4));
        }
        assert_eq!(cache.shard_len(4), None);
        assert_eq!(cache.shard_for(&6u64), 2);
    }

    #[test]
    fn eviction_is_per_shard() {
        // Two shards of capacity 1: even keys share shard 0, odd keys shard 1.
        let cache = ShardedLruCache::new(2, 1);
        cache.set(0u32, "a");
        cache.set(1u32, "b");
        cache.set(2u32, "c");
        assert_eq!(cache.get(&0), Err(NotFound));
        assert_eq!(cache.get(&1), Ok("b"));
        assert_eq!(cache.get(&2), Ok("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn string_keys_borrow_lookup() {
        let cache: ShardedLruCache<String, usize> = ShardedLruCache::new(8, 8);
        cache.set("alpha".to_string(), 1);
        cache.set("beta".to_string(), 2);
        assert_eq!(cache.get("alpha"), Ok(1));
        assert_eq!(cache.get_with("beta", |v| v + 1), Ok(3));
        assert!(cache.contains("beta"));
        assert_eq!(cache.remove("alpha"), Ok(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn generic_keys_route_through_pool() {
        let cache: ShardedLruCache<(u32, String), u8> = ShardedLruCache::new(8, 2);
        let key = (7, "seven".to_string());
        cache.set(key.clone(), 7);
        assert_eq!(cache.get(&key), Ok(7));
        assert_eq!(cache.shard_for(&key), cache.shard_for(&key.clone()));
    }

    #[test]
    fn clear_empties_all_shards() {
        let cache = ShardedLruCache::new(4, 4);
        for k in 0u8..12 {
            cache.set(k, k);
        }
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(ShardedLruCache::new(8, 32));
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u64 {
                        let key = t * 1_000 + i;
                        cache.set(key, i);
                        let _ = cache.get(&key);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(cache.len() <= cache.capacity());
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShardedLruCache<String, Vec<u8>>>();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_aggregate_across_shards() {
        let cache = ShardedLruCache::new(2, 1);
        cache.set(0u32, ());
        cache.set(1u32, ());
        cache.set(2u32, ());
        let _ = cache.get(&1);
        let _ = cache.get(&0);

        let total = cache.metrics_snapshot();
        assert_eq!(total.insert_new, 3);
        assert_eq!(total.evicted_entries, 1);
        assert_eq!(total.get_hits, 1);
        assert_eq!(total.get_misses, 1);
        assert_eq!(total.cache_len, 2);
        assert_eq!(total.capacity, 2);

        let shard0 = cache.shard_metrics(0).unwrap();
        assert_eq!(shard0.evicted_entries, 1);

        cache.reset_metrics();
        let reset = cache.metrics_snapshot();
        assert_eq!(reset.get_calls, 0);
        assert_eq!(reset.evicted_entries, 0);
        assert_eq!(reset.cache_len, 2);
    }
}

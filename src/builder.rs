//! Builder for [`ShardedLruCache`].
//!
//! Two construction paths share one configuration:
//!
//! - [`build`](CacheBuilder::build) never fails; zero values are replaced the
//!   same way [`ShardedLruCache::new`] does.
//! - [`try_build`](CacheBuilder::try_build) rejects zero values with a
//!   [`ConfigError`].
//!
//! [`total_capacity`](CacheBuilder::total_capacity) is resolved against the
//! final shard count when the cache is built, so setter order does not
//! matter.
//!
//! ## Example
//!
//! ```rust
//! use shardkit::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new()
//!     .shards(16)
//!     .shard_capacity(256)
//!     .build::<u64, String>();
//! assert_eq!(cache.capacity(), 16 * 256);
//!
//! let err = CacheBuilder::new().shards(0).try_build::<u64, String>().unwrap_err();
//! assert!(err.to_string().contains("shard count"));
//! ```

use crate::cache::{ShardedLruCache, DEFAULT_SHARD_CAPACITY};
use crate::error::ConfigError;
use crate::hash::ShardKey;

/// Shard count used by [`CacheBuilder::new`].
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Configuration for a [`ShardedLruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    shards: usize,
    shard_capacity: usize,
    total_capacity: Option<usize>,
}

impl CacheBuilder {
    /// Starts from [`DEFAULT_SHARD_COUNT`] shards of [`DEFAULT_SHARD_CAPACITY`].
    pub fn new() -> Self {
        Self {
            shards: DEFAULT_SHARD_COUNT,
            shard_capacity: DEFAULT_SHARD_CAPACITY,
            total_capacity: None,
        }
    }

    /// Sets the number of shards.
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Sets the per-shard entry capacity. Replaces an earlier
    /// [`total_capacity`](Self::total_capacity).
    pub fn shard_capacity(mut self, capacity: usize) -> Self {
        self.shard_capacity = capacity;
        self.total_capacity = None;
        self
    }

    /// Splits `total` entries evenly across the shards the cache is built
    /// with, rounding up so it holds at least `total` entries. Replaces an
    /// earlier [`shard_capacity`](Self::shard_capacity).
    pub fn total_capacity(mut self, total: usize) -> Self {
        self.total_capacity = Some(total);
        self
    }

    /// Per-shard capacity after resolving `total_capacity` against `shards`.
    fn resolved_shard_capacity(&self, shards: usize) -> usize {
        match self.total_capacity {
            Some(total) => total.div_ceil(shards.max(1)),
            None => self.shard_capacity,
        }
    }

    /// Builds the cache, replacing zero values with defaults.
    pub fn build<K, V>(self) -> ShardedLruCache<K, V>
    where
        K: ShardKey + Eq + Clone,
    {
        ShardedLruCache::new(self.shards, self.resolved_shard_capacity(self.shards))
    }

    /// Builds the cache, rejecting a zero shard count or capacity.
    pub fn try_build<K, V>(self) -> Result<ShardedLruCache<K, V>, ConfigError>
    where
        K: ShardKey + Eq + Clone,
    {
        if self.shards == 0 {
            return Err(ConfigError::new("shard count must be greater than zero"));
        }
        let shard_capacity = self.resolved_shard_capacity(self.shards);
        if shard_capacity == 0 {
            return Err(ConfigError::new(
                "shard capacity must be greater than zero",
            ));
        }
        Ok(ShardedLruCache::with_validated(self.shards, shard_capacity))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Key-to-shard routing.
//!
//! Maps any [`ShardKey`] to a shard index in `[0, shards)` using the key's
//! type-aware [`shard_hash`](ShardKey::shard_hash).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shard Routing Flow                              │
//! │                                                                         │
//! │   Input Key                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ┌───────────────────────────────────────────────────────────────┐     │
//! │   │  KeyRouter { shards: 4 }                                      │     │
//! │   │                                                               │     │
//! │   │  1. h = key.shard_hash()     (fast path or pooled FNV-1a)     │     │
//! │   │  2. index = h % 4                                             │     │
//! │   │                                                               │     │
//! │   └───────────────────────────────────────────────────────────────┘     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   Shard Index: 0, 1, 2, or 3                                            │
//! │                                                                         │
//! │   ┌─────────┬─────────┬─────────┬─────────┐                             │
//! │   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │                             │
//! │   │  keys   │  keys   │  keys   │  keys   │                             │
//! │   │  0, 4   │  1, 5   │  2, 6   │  3, 7   │                             │
//! │   └─────────┴─────────┴─────────┴─────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! Properties
//! ──────────
//! • Deterministic: Same (key, shards) always yields the same shard
//! • Allocation-free for integers, bools, chars and strings
//! ```
//!
//! ## Limitation: integer skew
//!
//! Integer hashes are the key's own bits, reduced by plain modulo with no
//! avalanche step. Sequential ids spread perfectly, but patterned sets do
//! not: with 8 shards, keys that are all multiples of 8 land on shard 0.
//! Wrap such keys in a newtype with an empty `impl ShardKey` to route them
//! through FNV-1a instead.
//!
//! ## Example Usage
//!
//! ```
//! use shardkit::ds::KeyRouter;
//!
//! let router = KeyRouter::new(4);
//!
//! let a = router.route(&"user:123");
//! assert!(a < 4);
//! assert_eq!(router.route(&"user:123"), a);
//!
//! // Integers route by modulo.
//! assert_eq!(router.route(&10u64), 2);
//! ```

use crate::hash::ShardKey;

/// Deterministic router from keys to shard indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRouter {
    shards: usize,
}

impl KeyRouter {
    /// Creates a router for `shards` shards.
    ///
    /// The shard count is clamped to at least 1.
    ///
    /// ```
    /// use shardkit::ds::KeyRouter;
    ///
    /// assert_eq!(KeyRouter::new(16).shard_count(), 16);
    /// assert_eq!(KeyRouter::new(0).shard_count(), 1);
    /// ```
    pub fn new(shards: usize) -> Self {
        Self {
            shards: shards.max(1),
        }
    }

    /// Returns the number of shards.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps a key to a shard index in `[0, shards)`.
    #[inline]
    pub fn route<K: ShardKey + ?Sized>(&self, key: &K) -> usize {
        key.shard_hash() as usize % self.shards
    }
}

impl Default for KeyRouter {
    /// Creates a single-shard router.
    fn default() -> Self {
        Self::new(1)
    }
}

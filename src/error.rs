//! Error types for the shardkit library.
//!
//! ## Key Components
//!
//! - [`NotFound`]: The only error a cache lookup can produce. Returned as a
//!   value so a miss is never confused with a hit on a default value.
//! - [`ConfigError`]: Returned by the strict construction path
//!   ([`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build))
//!   when the shard count or capacity is zero.
//! - [`InvariantError`]: Returned when a shard's lookup table and eviction
//!   list disagree ([`ShardedLruCache::check_invariants`](crate::cache::ShardedLruCache::check_invariants)).
//!
//! ## Example Usage
//!
//! ```
//! use shardkit::error::NotFound;
//! use shardkit::ShardedLruCache;
//!
//! let cache: ShardedLruCache<u64, String> = ShardedLruCache::new(4, 16);
//! assert_eq!(cache.get(&1), Err(NotFound));
//! ```

use thiserror::Error;

/// The requested key is not present in its shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("key not found")]
pub struct NotFound;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error returned when internal shard invariants are violated.
///
/// Carries the offending shard index and a description of the failed check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shard {shard}: {message}")]
pub struct InvariantError {
    shard: usize,
    message: String,
}

impl InvariantError {
    #[inline]
    pub fn new(shard: usize, msg: impl Into<String>) -> Self {
        Self {
            shard,
            message: msg.into(),
        }
    }

    #[inline]
    pub fn shard(&self) -> usize {
        self.shard
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

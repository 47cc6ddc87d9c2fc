//! shardkit: a sharded, thread-safe, fixed-capacity LRU cache.
//!
//! Keys are routed to one of N independently locked shards by a type-aware
//! hash ([`hash::ShardKey`]). Each shard keeps its own lookup table and
//! recency list and evicts its own least recently used entry when full.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use shardkit::ShardedLruCache;
//!
//! let cache = Arc::new(ShardedLruCache::new(8, 128));
//! let writer = {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || cache.set("answer".to_string(), 42))
//! };
//! writer.join().unwrap();
//! assert_eq!(cache.get("answer"), Ok(42));
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod shard;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use builder::CacheBuilder;
pub use cache::{ShardedLruCache, DEFAULT_SHARD_CAPACITY};
pub use error::NotFound;

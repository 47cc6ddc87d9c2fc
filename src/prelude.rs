pub use crate::builder::CacheBuilder;
pub use crate::cache::{ShardedLruCache, DEFAULT_SHARD_CAPACITY};
pub use crate::ds::{EvictionList, KeyRouter, SlotId};
pub use crate::error::{ConfigError, InvariantError, NotFound};
pub use crate::hash::ShardKey;
pub use crate::shard::{Entry, Shard, ShardCore};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;

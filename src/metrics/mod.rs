//! Optional per-shard counters (`metrics` feature).

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::ShardMetrics;
pub use snapshot::CacheMetricsSnapshot;

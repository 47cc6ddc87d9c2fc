//! # Metrics Traits
//!
//! Recording and snapshotting are split so shard logic only ever writes
//! counters and the cache only ever reads them.
//!
//! ```text
//!   ┌─────────────────────────────┐        ┌──────────────────────────────┐
//!   │     CoreMetricsRecorder     │        │ MetricsSnapshotProvider<S>   │
//!   │  get_hit/get_miss/insert    │        │ (cache, tests, benches)      │
//!   │  evict/remove/clear         │        └──────────────────────────────┘
//!   └─────────────────────────────┘
//! ```
//!
//! Recorders take `&mut self`: every call happens under the owning shard's
//! write guard, so plain integer counters suffice.

/// Counters every shard records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove(&mut self);
    fn record_clear(&mut self);
}

/// Produces a point-in-time copy of recorded counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

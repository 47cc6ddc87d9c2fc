use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider};

/// Per-shard counters, owned by the shard and guarded by its lock.
#[derive(Debug, Default)]
pub struct ShardMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub removes: u64,
    pub clears: u64,
}

impl CoreMetricsRecorder for ShardMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_remove(&mut self) {
        self.removes += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl MetricsSnapshotProvider<CacheMetricsSnapshot> for ShardMetrics {
    /// Counter fields only; gauges are filled in by the shard.
    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evicted_entries: self.evicted_entries,
            removes: self.removes,
            clears: self.clears,
            cache_len: 0,
            capacity: 0,
        }
    }
}

impl MetricsReset for ShardMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

use std::ops::{Add, AddAssign};

/// Point-in-time counters for one shard, or the sum over all shards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evicted_entries: u64,
    pub removes: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before the first call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

impl AddAssign for CacheMetricsSnapshot {
    fn add_assign(&mut self, rhs: Self) {
        self.get_calls += rhs.get_calls;
        self.get_hits += rhs.get_hits;
        self.get_misses += rhs.get_misses;
        self.insert_calls += rhs.insert_calls;
        self.insert_updates += rhs.insert_updates;
        self.insert_new += rhs.insert_new;
        self.evicted_entries += rhs.evicted_entries;
        self.removes += rhs.removes;
        self.clears += rhs.clears;
        self.cache_len = self.cache_len.saturating_add(rhs.cache_len);
        self.capacity = self.capacity.saturating_add(rhs.capacity);
    }
}

impl Add for CacheMetricsSnapshot {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

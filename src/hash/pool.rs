//! Bounded pool of reusable hashers.
//!
//! ## Architecture
//!
//! ```text
//!   HasherPool { free: ArrayQueue<Fnv1aHasher> }
//!
//!   checkout() ──► pop idle hasher (or create one) ──► reset
//!                                                       │
//!                                                       ▼
//!                                        PooledHasher (exclusive use)
//!                                                       │
//!                                              drop ────┘
//!                                                       │
//!                                                       ▼
//!                                push back (dropped if pool is full)
//! ```
//!
//! A checked-out hasher is owned by exactly one caller until its guard is
//! dropped; the queue itself is lock-free, so the pool needs no extra
//! synchronization around the hasher.

use std::ops::{Deref, DerefMut};

use crossbeam_queue::ArrayQueue;
use once_cell::sync::Lazy;

use crate::hash::fnv::Fnv1aHasher;

/// Idle hashers retained by the process-wide pool.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

static GLOBAL_POOL: Lazy<HasherPool> = Lazy::new(|| HasherPool::new(DEFAULT_POOL_CAPACITY));

/// Lock-free free list of [`Fnv1aHasher`] instances.
#[derive(Debug)]
pub struct HasherPool {
    free: ArrayQueue<Fnv1aHasher>,
}

impl HasherPool {
    /// Creates a pool retaining at most `capacity` idle hashers (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            free: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Returns the process-wide pool used by the generic routing path.
    pub fn global() -> &'static HasherPool {
        &GLOBAL_POOL
    }

    /// Checks out a hasher in its initial state.
    pub fn checkout(&self) -> PooledHasher<'_> {
        let mut hasher = self.free.pop().unwrap_or_default();
        hasher.reset();
        PooledHasher { pool: self, hasher }
    }

    /// Number of idle hashers currently held.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Maximum number of idle hashers retained.
    pub fn capacity(&self) -> usize {
        self.free.capacity()
    }

    fn give_back(&self, hasher: Fnv1aHasher) {
        // Full pool: let the hasher drop.
        let _ = self.free.push(hasher);
    }
}

impl Default for HasherPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

/// Exclusive handle to a hasher; returns it to the pool on drop.
#[derive(Debug)]
pub struct PooledHasher<'a> {
    pool: &'a HasherPool,
    hasher: Fnv1aHasher,
}

impl Deref for PooledHasher<'_> {
    type Target = Fnv1aHasher;

    fn deref(&self) -> &Self::Target {
        &self.hasher
    }
}

impl DerefMut for PooledHasher<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.hasher
    }
}

impl Drop for PooledHasher<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.hasher));
    }
}

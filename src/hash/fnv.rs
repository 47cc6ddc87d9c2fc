//! 32-bit FNV-1a.
//!
//! Used by the generic routing path: the key's [`Hash`](std::hash::Hash)
//! output is streamed through [`Fnv1aHasher`] and the 32-bit state is the
//! routing hash. Instances are recycled through
//! [`HasherPool`](crate::hash::pool::HasherPool).

use std::hash::Hasher;

const OFFSET_BASIS: u32 = 0x811c_9dc5;
const PRIME: u32 = 0x0100_0193;

/// Streaming FNV-1a hasher with a 32-bit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1aHasher {
    state: u32,
}

impl Fnv1aHasher {
    #[inline]
    pub const fn new() -> Self {
        Self {
            state: OFFSET_BASIS,
        }
    }

    /// Restores the offset basis so the instance can hash a new input.
    #[inline]
    pub fn reset(&mut self) {
        self.state = OFFSET_BASIS;
    }

    #[inline]
    pub fn update(&mut self, bytes: &[u8]) {
        let mut state = self.state;
        for &byte in bytes {
            state ^= u32::from(byte);
            state = state.wrapping_mul(PRIME);
        }
        self.state = state;
    }

    #[inline]
    pub fn finish32(&self) -> u32 {
        self.state
    }

    /// One-shot hash of a byte slice.
    pub fn hash_bytes(bytes: &[u8]) -> u32 {
        let mut hasher = Self::new();
        hasher.update(bytes);
        hasher.finish32()
    }
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(Fnv1aHasher::hash_bytes(b""), 0x811c_9dc5);
        assert_eq!(Fnv1aHasher::hash_bytes(b"a"), 0xe40c_292c);
        assert_eq!(Fnv1aHasher::hash_bytes(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn fnv1a_streaming_matches_one_shot() {
        let mut hasher = Fnv1aHasher::new();
        hasher.write(b"foo");
        hasher.write(b"bar");
        assert_eq!(hasher.finish32(), Fnv1aHasher::hash_bytes(b"foobar"));
        assert_eq!(hasher.finish(), u64::from(hasher.finish32()));
    }

    #[test]
    fn fnv1a_reset_restores_offset_basis() {
        let mut hasher = Fnv1aHasher::new();
        hasher.update(b"dirty");
        hasher.reset();
        assert_eq!(hasher, Fnv1aHasher::new());
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use shardkit::ShardedLruCache;

// Fuzz arbitrary operation sequences on ShardedLruCache
//
// Tests random set/get/peek/remove/clear sequences and checks capacity
// bounds plus structural invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let shards = (data[0] as usize % 8) + 1;
    let capacity = (data[1] as usize % 8) + 1;
    let cache: ShardedLruCache<u16, u16> = ShardedLruCache::new(shards, capacity);

    for chunk in data[2..].chunks_exact(3) {
        let op = chunk[0] % 6;
        let key = u16::from_le_bytes([chunk[1], chunk[2]]) % 64;

        match op {
            0 | 1 => {
                cache.set(key, key.wrapping_mul(3));
                assert_eq!(cache.peek(&key), Ok(key.wrapping_mul(3)));
            }
            2 => {
                if let Ok(v) = cache.get(&key) {
                    assert_eq!(v, key.wrapping_mul(3));
                }
            }
            3 => {
                let _ = cache.remove(&key);
                assert!(!cache.contains(&key));
            }
            4 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.peek(&key).is_ok(), was_present);
            }
            _ => {
                if chunk[1] == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }

        assert!(cache.len() <= cache.capacity());
        assert!(cache.check_invariants().is_ok());
    }
});

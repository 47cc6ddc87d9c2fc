#![no_main]

use libfuzzer_sys::fuzz_target;
use shardkit::ds::KeyRouter;
use shardkit::hash::ShardKey;

// Fuzz key routing
//
// Every key must land in range, routing must be deterministic, and a
// String must route exactly like its borrowed str.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let shard_count = (data[0] as usize % 64) + 1;
    let router = KeyRouter::new(shard_count);
    let mut shard_counts = vec![0usize; shard_count];

    for chunk in data[1..].chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let key = u32::from_le_bytes(word);

        let shard = router.route(&key);
        assert!(shard < shard_count);
        assert_eq!(shard, router.route(&key));
        assert_eq!(shard, key as usize % shard_count);
        shard_counts[shard] += 1;
    }
    assert_eq!(shard_counts.iter().sum::<usize>(), data[1..].chunks(4).count());

    if let Ok(text) = std::str::from_utf8(&data[1..]) {
        let owned = text.to_owned();
        assert_eq!(router.route(text), router.route(&owned));
        assert_eq!(text.shard_hash(), owned.shard_hash());
    }

    let bytes = data[1..].to_vec();
    assert_eq!(bytes.shard_hash(), bytes.clone().shard_hash());
    assert!(router.route(&bytes) < shard_count);
});

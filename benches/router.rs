use criterion::{criterion_group, criterion_main, Criterion};
use shardkit::ds::KeyRouter;
use shardkit::hash::{Fnv1aHasher, HasherPool, ShardKey};

fn bench_route_integers(c: &mut Criterion) {
    let router = KeyRouter::new(16);
    c.bench_function("route_u64", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for i in 0..4096u64 {
                acc ^= router.route(&std::hint::black_box(i));
            }
            std::hint::black_box(acc)
        })
    });
}

fn bench_route_strings(c: &mut Criterion) {
    let router = KeyRouter::new(16);
    let keys: Vec<String> = (0..1024).map(|i| format!("user:{i:06}:profile")).collect();
    c.bench_function("route_str", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for k in &keys {
                acc ^= router.route(std::hint::black_box(k.as_str()));
            }
            std::hint::black_box(acc)
        })
    });
}

fn bench_route_generic(c: &mut Criterion) {
    let router = KeyRouter::new(16);
    let keys: Vec<(u32, u32)> = (0..1024u32).map(|i| (i, i.wrapping_mul(31))).collect();
    c.bench_function("route_tuple_pooled", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for k in &keys {
                acc ^= router.route(std::hint::black_box(k));
            }
            std::hint::black_box(acc)
        })
    });
}

fn bench_pool_vs_fresh(c: &mut Criterion) {
    let payload = b"a moderately sized key used for hashing";
    let pool = HasherPool::new(8);
    c.bench_function("fnv_pooled_checkout", |b| {
        b.iter(|| {
            let mut hasher = pool.checkout();
            hasher.update(std::hint::black_box(payload));
            std::hint::black_box(hasher.finish32())
        })
    });
    c.bench_function("fnv_fresh", |b| {
        b.iter(|| std::hint::black_box(Fnv1aHasher::hash_bytes(std::hint::black_box(payload))))
    });
    c.bench_function("shard_hash_vec", |b| {
        let key = payload.to_vec();
        b.iter(|| std::hint::black_box(std::hint::black_box(&key).shard_hash()))
    });
}

criterion_group!(
    benches,
    bench_route_integers,
    bench_route_strings,
    bench_route_generic,
    bench_pool_vs_fresh
);
criterion_main!(benches);

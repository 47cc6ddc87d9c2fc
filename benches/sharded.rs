use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shardkit::ShardedLruCache;
use std::sync::{Arc, Barrier};
use std::thread;

const OPS: u64 = 4096;

fn zipf_like_keys(n: usize, universe: u64, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            // Squaring a uniform sample skews toward small keys.
            let u: f64 = rng.gen();
            (u * u * universe as f64) as u64
        })
        .collect()
}

fn bench_set_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_set_get");
    group.throughput(Throughput::Elements(OPS));
    for shards in [1usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(shards), &shards, |b, &shards| {
            b.iter_batched(
                || {
                    let cache = ShardedLruCache::new(shards, 1024);
                    for i in 0..OPS {
                        cache.set(i, i);
                    }
                    cache
                },
                |cache| {
                    for i in 0..OPS {
                        cache.set(std::hint::black_box(i + 10_000), i);
                        let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("sharded_eviction_churn", |b| {
        b.iter_batched(
            || {
                let cache = ShardedLruCache::new(16, 64);
                for i in 0..1024u64 {
                    cache.set(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..OPS {
                    cache.set(std::hint::black_box(100_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_skewed_hit_path(c: &mut Criterion) {
    let keys = zipf_like_keys(OPS as usize, 8192, 42);
    let cache = ShardedLruCache::new(16, 256);
    for &k in &keys {
        cache.set(k, k);
    }
    c.bench_function("sharded_skewed_get", |b| {
        b.iter(|| {
            let mut hits = 0u64;
            for &k in &keys {
                if cache.get(&std::hint::black_box(k)).is_ok() {
                    hits += 1;
                }
            }
            std::hint::black_box(hits)
        })
    });
}

fn bench_string_keys(c: &mut Criterion) {
    let keys: Vec<String> = (0..1024).map(|i| format!("session:{i:08}")).collect();
    let cache = ShardedLruCache::new(16, 128);
    for (i, k) in keys.iter().enumerate() {
        cache.set(k.clone(), i);
    }
    c.bench_function("sharded_string_get", |b| {
        b.iter(|| {
            for k in &keys {
                let _ = std::hint::black_box(cache.get(std::hint::black_box(k.as_str())));
            }
        })
    });
}

fn bench_contended_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_contended");
    let threads = 4usize;
    group.throughput(Throughput::Elements(OPS * threads as u64));
    for shards in [1usize, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(shards), &shards, |b, &shards| {
            b.iter(|| {
                let cache: Arc<ShardedLruCache<u64, u64>> =
                    Arc::new(ShardedLruCache::new(shards, 512));
                let barrier = Arc::new(Barrier::new(threads));
                let handles: Vec<_> = (0..threads as u64)
                    .map(|t| {
                        let cache = Arc::clone(&cache);
                        let barrier = Arc::clone(&barrier);
                        thread::spawn(move || {
                            barrier.wait();
                            for i in 0..OPS {
                                let key = (i * 7 + t) % 2048;
                                if i % 4 == 0 {
                                    cache.set(key, i);
                                } else {
                                    let _ = std::hint::black_box(cache.get(&key));
                                }
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    let _ = h.join();
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set_get,
    bench_eviction_churn,
    bench_skewed_hit_path,
    bench_string_keys,
    bench_contended_threads
);
criterion_main!(benches);

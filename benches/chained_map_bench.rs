use chained_map::ChainedMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// 16 fixed buckets: at 1k entries every chain is ~64 nodes long.
const N: usize = 1_000;

fn filled(seed: u64) -> (ChainedMap<String, u64>, Vec<String>) {
    let mut m = ChainedMap::new();
    let keys: Vec<_> = lcg(seed).take(N).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.put(k.clone(), i as u64);
    }
    (m, keys)
}

fn bench_put_fresh(c: &mut Criterion) {
    c.bench_function("chained::put_fresh_1k", |b| {
        b.iter_batched(
            || lcg(1).take(N).map(key).collect::<Vec<_>>(),
            |keys| {
                let mut m = ChainedMap::new();
                for (i, k) in keys.into_iter().enumerate() {
                    m.put(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_overwrite(c: &mut Criterion) {
    c.bench_function("chained::put_overwrite_1k", |b| {
        b.iter_batched(
            || filled(2),
            |(mut m, keys)| {
                for (i, k) in keys.into_iter().enumerate() {
                    m.put(k, i as u64 + 1);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained::get_hit_1k", |b| {
        let (m, keys) = filled(7);
        b.iter(|| {
            for k in &keys {
                black_box(m.get(k.as_str()));
            }
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained::get_miss_1k", |b| {
        let (m, _) = filled(11);
        let misses: Vec<_> = lcg(0xdead_beef).take(N).map(key).collect();
        b.iter(|| {
            for k in &misses {
                black_box(m.get(k.as_str()));
            }
        })
    });
}

fn bench_remove_all(c: &mut Criterion) {
    c.bench_function("chained::remove_all_1k", |b| {
        b.iter_batched(
            || filled(5),
            |(mut m, keys)| {
                for k in &keys {
                    black_box(m.remove(k.as_str()));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh, bench_put_overwrite
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit, bench_get_miss, bench_remove_all
}
criterion_main!(benches_put, benches_ops);

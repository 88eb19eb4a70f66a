use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use qcollections::{Array, Dict, DictOptions, ResizePolicy};
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

fn filled(n: usize, seed: u64) -> (Dict<u64>, Vec<String>) {
    let mut d = Dict::with_buckets(1);
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        d.put(Some(k.as_str()), i as u64);
    }
    (d, keys)
}

fn bench_put_100k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(100_000).map(key).collect();
    c.bench_function("dict::put_lazy_100k", |b| {
        b.iter_batched(
            || Dict::<u64>::with_buckets(1),
            |mut d| {
                for (i, k) in keys.iter().enumerate() {
                    d.put(Some(k.as_str()), i as u64);
                }
                black_box(d)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("dict::put_eager_100k", |b| {
        b.iter_batched(
            || {
                Dict::<u64>::with_options(DictOptions {
                    initial_buckets: 1,
                    resize: ResizePolicy::OnInsert,
                })
            },
            |mut d| {
                for (i, k) in keys.iter().enumerate() {
                    d.put(Some(k.as_str()), i as u64);
                }
                black_box(d)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lookup_10k(c: &mut Criterion) {
    c.bench_function("dict::lookup_hit_10k", |b| {
        b.iter_batched(
            || filled(10_000, 2),
            |(mut d, keys)| {
                let mut sum = 0u64;
                for k in &keys {
                    sum = sum.wrapping_add(*d.lookup(Some(k.as_str())).unwrap());
                }
                black_box(sum)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("dict::lookup_miss_10k", |b| {
        let misses: Vec<String> = lcg(99).take(10_000).map(key).collect();
        b.iter_batched(
            || filled(10_000, 3).0,
            |mut d| {
                let mut hits = 0usize;
                for k in &misses {
                    hits += d.contains_key(Some(k.as_str())) as usize;
                }
                black_box(hits)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_delete_10k(c: &mut Criterion) {
    c.bench_function("dict::delete_10k", |b| {
        b.iter_batched(
            || filled(10_000, 4),
            |(mut d, keys)| {
                for k in &keys {
                    d.delete(Some(k.as_str()));
                }
                black_box(d)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_array_append_find(c: &mut Criterion) {
    let keys: Vec<String> = lcg(5).take(10_000).map(key).collect();
    c.bench_function("array::append_then_find_10k", |b| {
        b.iter_batched(
            Array::<u64>::new,
            |mut a| {
                for (i, k) in keys.iter().enumerate() {
                    a.append(Some(k.as_str()), i as u64);
                }
                let mut sum = 0usize;
                for k in &keys {
                    sum += a.find(Some(k.as_str())).unwrap_or(0);
                }
                black_box(sum)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_dict;
    config = bench_config();
    targets = bench_put_100k, bench_lookup_10k, bench_delete_10k
}
criterion_group! {
    name = benches_array;
    config = bench_config();
    targets = bench_array_append_find
}
criterion_main!(benches_dict, benches_array);

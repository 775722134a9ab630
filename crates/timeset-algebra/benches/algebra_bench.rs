// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{env, hint::black_box};
use timeset_algebra::{algebra, builder::IntervalSetBuilder, intervalset::IntervalSet};
use timeset_core::{
    interval::{Bounds, Endpoint, Interval},
    time::TimePoint,
};

type Set = IntervalSet<TimePoint<i64>>;

#[inline]
fn t(v: i64) -> TimePoint<i64> {
    TimePoint::new(v)
}
#[inline]
fn iv(a: i64, b: i64) -> Interval<TimePoint<i64>> {
    Interval::new(t(a), t(b))
}

fn gen_intervals(horizon: i64, n: usize, rng: &mut impl Rng) -> Vec<Interval<TimePoint<i64>>> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let a = rng.random_range(0..=horizon);
        let w = rng.random_range(0..=64i64);
        out.push(iv(a, (a + w).min(horizon)));
    }
    out
}

fn gen_points(horizon: i64, n: usize, rng: &mut impl Rng) -> Vec<TimePoint<i64>> {
    (0..n).map(|_| t(rng.random_range(0..=horizon))).collect()
}

fn register_reduce(c: &mut Criterion, horizon: i64, n: usize) {
    let mut group = c.benchmark_group("intervalset_reduce");
    group.throughput(Throughput::Elements(n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0xA11CE_DEAD_BEEF);
    let input = gen_intervals(horizon, n, &mut rng);

    group.bench_function(BenchmarkId::new("from_intervals", n), |b| {
        b.iter_batched(
            || input.clone(),
            |v| black_box(Set::from_intervals(v)),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn register_algebra(c: &mut Criterion, horizon: i64, n: usize) {
    let mut group = c.benchmark_group("intervalset_algebra");

    let mut rng = ChaCha8Rng::seed_from_u64(0xFEED_FACE_CAFE_BABE);
    let a = Set::from_intervals(gen_intervals(horizon, n, &mut rng));
    let b = Set::from_intervals(gen_intervals(horizon, n, &mut rng));
    let span = Some(iv(0, horizon));

    group.bench_function("union", |bench| {
        bench.iter(|| black_box(algebra::union(&a, &b)))
    });
    group.bench_function("intersection", |bench| {
        bench.iter(|| black_box(algebra::intersection(&a, &b, false)))
    });
    group.bench_function("subtract", |bench| {
        bench.iter(|| black_box(algebra::subtract(&a, &b)))
    });
    group.bench_function("complement", |bench| {
        bench.iter(|| black_box(algebra::complement(&a, span)))
    });
    group.finish();
}

fn register_contains(c: &mut Criterion, horizon: i64, n: usize, queries_n: usize) {
    let mut group = c.benchmark_group("intervalset_contains");
    group.throughput(Throughput::Elements(queries_n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0x1234_5678_9ABC_DEF0);
    let set = Set::from_intervals(gen_intervals(horizon, n, &mut rng));
    let points = gen_points(horizon, queries_n, &mut rng);

    group.bench_function("points", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &p in &points {
                if set.contains(Endpoint::Point(p), Bounds::CLOSED_OPEN) {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn register_builder(c: &mut Criterion, horizon: i64, n: usize) {
    let mut group = c.benchmark_group("intervalset_builder");
    group.throughput(Throughput::Elements(n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0xD00D_F00D_F0F0);
    let mut events = gen_points(horizon, n, &mut rng);
    events.sort_unstable();

    group.bench_function("events", |b| {
        b.iter(|| {
            let mut builder = IntervalSetBuilder::new(Some(t(0)), Some(t(horizon)));
            for (i, &e) in events.iter().enumerate() {
                let _ = if i % 2 == 0 {
                    builder.add_stop(e)
                } else {
                    builder.add_start(e)
                };
            }
            black_box(builder.build())
        })
    });
    group.finish();
}

fn timeset_benches(c: &mut Criterion) {
    // Defaults (override with env)
    let horizon = env::var("TIMESET_HORIZON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1_000_000i64);
    let n = env::var("TIMESET_INTERVALS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000usize);
    let queries = env::var("TIMESET_QUERIES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000usize);

    register_reduce(c, horizon, n);
    register_algebra(c, horizon, n);
    register_contains(c, horizon, n, queries);
    register_builder(c, horizon, n);
}

criterion_group!(benches, timeset_benches);
criterion_main!(benches);

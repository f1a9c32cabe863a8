// benches/ring_bench.rs
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use evring::prelude::*;
use std::hint::black_box;

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_push_pop");

    for cap in [16, 256, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("pre_sized", cap), cap, |b, &cap| {
            let mut ring = RingBuffer::new(cap);
            b.iter(|| {
                for i in 0..cap as u64 {
                    ring.push(black_box(i));
                }
                while let Some(v) = ring.pop() {
                    black_box(v);
                }
            });
        });
    }

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_growth");

    group.bench_function("from_capacity_1", |b| {
        b.iter(|| {
            let mut ring = RingBuffer::new(1);
            for i in 0..1024u64 {
                ring.push(black_box(i));
            }
            black_box(ring.capacity())
        });
    });

    group.bench_function("steady_state", |b| {
        // Grown once, then reused: the intended hot-path shape.
        let mut ring = RingBuffer::new(1024);
        b.iter(|| {
            for i in 0..1024u64 {
                ring.push(black_box(i));
            }
            while ring.pop().is_some() {}
        });
    });

    group.finish();
}

fn bench_pow2_vs_modulo(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_arithmetic");

    group.bench_function("pow2_capacity", |b| {
        let mut ring = RingBuffer::new(1024);
        b.iter(|| {
            for i in 0..512u64 {
                ring.push(black_box(i));
                black_box(ring.pop());
            }
        });
    });

    group.bench_function("non_pow2_capacity", |b| {
        let mut ring = RingBuffer::new(1000);
        b.iter(|| {
            for i in 0..512u64 {
                ring.push(black_box(i));
                black_box(ring.pop());
            }
        });
    });

    group.finish();
}

fn bench_pool_vs_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_comparison");

    group.bench_function("with_pool", |b| {
        let pool: RingPool<u64> = RingPool::new(PoolConfig {
            ring_capacity: 256,
            max_pool_size: 64,
            min_pool_size: 8,
        });

        b.iter(|| {
            let mut ring = pool.acquire();
            for i in 0..128u64 {
                ring.push(black_box(i));
            }
            while ring.pop().is_some() {}
        });
    });

    group.bench_function("direct_alloc", |b| {
        b.iter(|| {
            let mut ring = RingBuffer::new(256);
            for i in 0..128u64 {
                ring.push(black_box(i));
            }
            while ring.pop().is_some() {}
        });
    });

    group.finish();
}

fn bench_stage_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("stage_pipeline");

    group.bench_function("stage_drain_100", |b| {
        let mut stage = Stage::with_config(StageConfig {
            initial_capacity: 128,
            max_staged: 1024,
        });
        b.iter(|| {
            for i in 0..100u64 {
                stage.stage(black_box(i)).unwrap();
            }
            let n = stage.drain_with(|v| {
                black_box(v);
            });
            black_box(n)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_pop,
    bench_growth,
    bench_pow2_vs_modulo,
    bench_pool_vs_direct,
    bench_stage_pipeline
);

criterion_main!(benches);

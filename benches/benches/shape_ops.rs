// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use blockshape_shape::{
    Aabb, Axis, BooleanOp, Direction, Shape, block, block_occludes, collide, create, join,
    join_is_not_empty, or_all,
};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_eighth(&mut self) -> f64 {
        (self.next_u64() % 8) as f64 / 8.0
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Random boxes snapped to eighths, so they stay uniform.
fn gen_aligned_boxes(count: usize, seed: u64) -> Vec<Shape> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let (x, y, z) = (rng.next_eighth(), rng.next_eighth(), rng.next_eighth());
            create(x, y, z, x + 0.125, y + 0.125, z + 0.125)
        })
        .collect()
}

/// Random boxes with arbitrary bounds, which fall back to explicit boundaries.
fn gen_unaligned_boxes(count: usize, seed: u64) -> Vec<Shape> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let (x, y, z) = (
                rng.next_f64() * 0.8,
                rng.next_f64() * 0.8,
                rng.next_f64() * 0.8,
            );
            create(x, y, z, x + 0.2, y + 0.2, z + 0.2)
        })
        .collect()
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    group.bench_function("aligned", |b| {
        b.iter(|| black_box(create(0.0, 0.0, 0.25, 1.0, 0.5, 0.75)));
    });
    group.bench_function("unaligned", |b| {
        b.iter(|| black_box(create(0.1, 0.0, 0.3, 0.9, 0.45, 0.7)));
    });
    group.finish();
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");
    let slab = create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
    let post = create(0.375, 0.0, 0.375, 0.625, 1.0, 0.625);
    let odd = create(0.1, 0.2, 0.3, 0.7, 0.8, 0.9);
    for (name, op) in [
        ("or", BooleanOp::OR),
        ("and", BooleanOp::AND),
        ("only_first", BooleanOp::ONLY_FIRST),
    ] {
        group.bench_function(format!("uniform_{name}"), |b| {
            b.iter(|| black_box(join(&slab, &post, op)));
        });
        group.bench_function(format!("mixed_{name}"), |b| {
            b.iter(|| black_box(join(&slab, &odd, op)));
        });
    }
    group.bench_function("is_not_empty_uniform", |b| {
        b.iter(|| black_box(join_is_not_empty(&block(), &slab, BooleanOp::ONLY_FIRST)));
    });
    group.bench_function("is_not_empty_mixed", |b| {
        b.iter(|| black_box(join_is_not_empty(&odd, &post, BooleanOp::AND)));
    });
    group.finish();
}

fn bench_or_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("or_all");
    for &n in &[8usize, 32, 128] {
        group.throughput(Throughput::Elements(n as u64));
        let aligned = gen_aligned_boxes(n, 0xCAFE_F00D_DEAD_BEEF);
        group.bench_function(format!("aligned_n{}", n), |b| {
            b.iter(|| black_box(or_all(&aligned[0], &aligned[1..])));
        });
        let unaligned = gen_unaligned_boxes(n, 0xBADC_F00D_1234_5678);
        group.bench_function(format!("unaligned_n{}", n), |b| {
            b.iter(|| black_box(or_all(&unaligned[0], &unaligned[1..])));
        });
    }
    group.finish();
}

fn bench_collide(c: &mut Criterion) {
    let mut group = c.benchmark_group("collide");
    let shapes = gen_aligned_boxes(64, 0xC1A5_7E55_9999_ABCD);
    let stairs = or_all(&shapes[0], &shapes[1..]);
    let mover = Aabb::new(0.2, 1.5, 0.2, 0.8, 2.5, 0.8);
    group.bench_function("single_shape", |b| {
        b.iter(|| black_box(stairs.collide(Axis::Y, &mover, -4.0)));
    });
    group.bench_function("many_shapes", |b| {
        b.iter(|| black_box(collide(Axis::Y, &mover, &shapes, -4.0)));
    });
    group.bench_function("clip", |b| {
        b.iter(|| black_box(stairs.clip([0.5, 2.0, 0.5], [0.5, -1.0, 0.5])));
    });
    group.finish();
}

fn bench_occlusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("occlusion");
    let stairs = or_all(
        &create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0),
        [&create(0.0, 0.5, 0.5, 1.0, 1.0, 1.0)],
    );
    group.bench_function("block_occludes", |b| {
        b.iter(|| {
            for d in Direction::ALL {
                black_box(block_occludes(&stairs, &block(), d));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_create,
    bench_join,
    bench_or_all,
    bench_collide,
    bench_occlusion
);
criterion_main!(benches);

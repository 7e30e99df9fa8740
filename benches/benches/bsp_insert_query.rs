// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Rect};
use understory_bsp::{Outline, SearchMode, SpatialIndex};

const WORLD: f64 = 2048.0;

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Arc<Rect>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Arc::new(Rect::new(x0, y0, x0 + cell, y0 + cell)));
        }
    }
    out
}

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_circles(count: usize, max_r: f64) -> Vec<Circle> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let r = 1.0 + rng.next_f64() * max_r;
            let cx = r + rng.next_f64() * (WORLD - 2.0 * r);
            let cy = r + rng.next_f64() * (WORLD - 2.0 * r);
            Circle::new((cx, cy), r)
        })
        .collect()
}

fn world() -> Rect {
    Rect::new(0.0, 0.0, WORLD, WORLD)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("add_shapes_grid_n{}", n), |b| {
            b.iter_batched(
                || SpatialIndex::new(world()).unwrap(),
                |idx| {
                    let rejected = idx.add_shapes(rects.iter().cloned());
                    black_box(rejected.len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("add_shape_each_grid_n{}", n), |b| {
            b.iter_batched(
                || SpatialIndex::new(world()).unwrap(),
                |idx| {
                    for r in &rects {
                        black_box(idx.add_shape(r.clone()));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query_coarse_vs_fine(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let circles = gen_random_circles(4096, 24.0);

    let circle_idx = SpatialIndex::new(world()).unwrap();
    let circle_shapes: Vec<_> = circles.iter().copied().map(Arc::new).collect();
    let _ = circle_idx.add_shapes(circle_shapes.iter().cloned());

    let outline_idx = SpatialIndex::new(world()).unwrap();
    let outline_shapes: Vec<_> = circles.iter().map(|c| Arc::new(Outline::new(c))).collect();
    let _ = outline_idx.add_shapes(outline_shapes.iter().cloned());

    group.throughput(Throughput::Elements(256));
    for mode in [SearchMode::Coarse, SearchMode::Fine] {
        group.bench_function(format!("circle_{:?}", mode), |b| {
            b.iter(|| {
                let mut hits = 0;
                for q in circle_shapes.iter().take(256) {
                    hits += circle_idx.find_intersecting_shapes(q, mode).len();
                }
                black_box(hits);
            })
        });
        group.bench_function(format!("outline_{:?}", mode), |b| {
            b.iter(|| {
                let mut hits = 0;
                for q in outline_shapes.iter().take(256) {
                    hits += outline_idx.find_intersecting_shapes(q, mode).len();
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_query_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_rect");
    for &n in &[64usize, 128] {
        let idx = SpatialIndex::new(world()).unwrap();
        let _ = idx.add_shapes(gen_grid_rects(n, 10.0));
        group.bench_function(format!("viewport_grid_n{}", n), |b| {
            b.iter(|| {
                let hits = idx.query_rect(Rect::new(100.0, 100.0, 500.0, 500.0));
                black_box(hits.len());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query_coarse_vs_fine, bench_query_rect);
criterion_main!(benches);

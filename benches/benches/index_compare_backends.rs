// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_points::{Backend, FlatScan, KdTree, Point, Quadtree, RectangleArea};

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
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

fn gen_uniform_points(n: usize) -> Vec<Point<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..n)
        .map(|_| Point::new(rng.range(-1000.0, 1000.0), rng.range(-1000.0, 1000.0)))
        .collect()
}

/// One far outlier plus pairs of points `1e-8` apart, the worst case for
/// a quadtree's subdivision depth.
fn gen_pair_points(n: usize) -> Vec<Point<f64>> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut out = Vec::with_capacity(n + 1);
    out.push(Point::new(1000.0, 1000.0));
    for _ in 0..n / 2 {
        let x = rng.range(-100.0, 100.0);
        let y = rng.range(-100.0, 100.0);
        out.push(Point::new(x, y));
        out.push(Point::new(x + 1e-8, y));
    }
    out
}

fn small_query() -> RectangleArea<f64> {
    RectangleArea::new(-10.0, -10.0, 10.0, 10.0)
}

fn big_query() -> RectangleArea<f64> {
    RectangleArea::new(-500.0, -500.0, 500.0, 500.0)
}

fn sorted(mut v: Vec<Point<f64>>) -> Vec<Point<f64>> {
    v.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap());
    v
}

fn check_agreement(points: &[Point<f64>]) {
    let kd = KdTree::build(points).unwrap();
    let quad = Quadtree::build(points).unwrap();
    for area in [small_query(), big_query()] {
        assert_eq!(
            sorted(kd.find(&area)),
            sorted(quad.find(&area)),
            "kd-tree and quadtree disagree on {area}"
        );
    }
}

fn bench_backend<B: Backend<f64>>(c: &mut Criterion, name: &str, dist: &str, points: &[Point<f64>]) {
    let mut group = c.benchmark_group(format!("{name}_{dist}"));
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function(format!("build_n{}", points.len()), |b| {
        b.iter(|| black_box(B::build(black_box(points)).unwrap()))
    });

    for (label, area) in [("small_query", small_query()), ("big_query", big_query())] {
        group.bench_function(format!("{label}_n{}", points.len()), |b| {
            b.iter_batched(
                || B::build(points).unwrap(),
                |idx| black_box(idx.find(black_box(&area)).len()),
                BatchSize::LargeInput,
            )
        });
    }

    group.bench_function(format!("build_then_many_queries_n{}", points.len()), |b| {
        let idx = B::build(points).unwrap();
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..64 {
                let x = (q % 8) as f64 * 200.0 - 800.0;
                let y = (q / 8) as f64 * 200.0 - 800.0;
                total += idx.find(&RectangleArea::new(x, y, x + 20.0, y + 20.0)).len();
            }
            black_box(total)
        })
    });

    group.finish();
}

fn bench_uniform(c: &mut Criterion) {
    for &n in &[1_000usize, 100_000] {
        let points = gen_uniform_points(n);
        check_agreement(&points);
        bench_backend::<FlatScan<f64>>(c, "flatscan", "uniform", &points);
        bench_backend::<KdTree<f64>>(c, "kdtree", "uniform", &points);
        bench_backend::<Quadtree<f64>>(c, "quadtree", "uniform", &points);
    }
}

fn bench_pairs(c: &mut Criterion) {
    for &n in &[1_000usize, 100_000] {
        let points = gen_pair_points(n);
        check_agreement(&points);
        bench_backend::<FlatScan<f64>>(c, "flatscan", "pairs", &points);
        bench_backend::<KdTree<f64>>(c, "kdtree", "pairs", &points);
        bench_backend::<Quadtree<f64>>(c, "quadtree", "pairs", &points);
    }
}

criterion_group!(benches, bench_uniform, bench_pairs);
criterion_main!(benches);

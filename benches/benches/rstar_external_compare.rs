// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_points::{Backend, KdTree, Point, Quadtree, RectangleArea};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn to_rstar_points(v: &[Point<f64>]) -> Vec<[f64; 2]> {
    v.iter().map(|p| [p.x, p.y]).collect()
}

fn bench_rstar_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_external_compare_f64");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 10.0);
        let query = RectangleArea::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        let rtree = RTree::bulk_load(to_rstar_points(&points));
        let envelope = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
        let expected = rtree.locate_in_envelope(&envelope).count();
        assert_eq!(KdTree::build(&points).unwrap().find(&query).len(), expected);
        assert_eq!(Quadtree::build(&points).unwrap().find(&query).len(), expected);

        group.bench_function(format!("kdtree_build_query_n{}", n), |b| {
            b.iter(|| {
                let idx = KdTree::build(&points).unwrap();
                black_box(idx.find(&query).len())
            })
        });

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter(|| {
                let idx = Quadtree::build(&points).unwrap();
                black_box(idx.find(&query).len())
            })
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    black_box(tree.locate_in_envelope(&envelope).count())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare_f64);
criterion_main!(benches);

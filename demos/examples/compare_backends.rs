// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compare backends.
//!
//! Index random points with every backend, query with rectangles coming from
//! kurbo, and check that all backends agree.
//!
//! Run:
//! - `cargo run -p understory_points_examples --example compare_backends`

use std::time::Instant;

use kurbo::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_points::{Backend, FlatScan, KdTree, Point, Quadtree, RectangleArea};

fn sorted(mut v: Vec<Point<f64>>) -> Vec<Point<f64>> {
    v.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap());
    v
}

fn timed<B: Backend<f64>>(name: &str, points: &[Point<f64>]) -> B {
    let start = Instant::now();
    let idx = B::build(points).unwrap();
    info!(backend = name, elapsed = ?start.elapsed(), "built");
    idx
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let points: Vec<Point<f64>> = (0..20_000)
        .map(|_| {
            // kurbo points feed straight in.
            let p = kurbo::Point::new(
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
            );
            Point::from(p)
        })
        .collect();

    let flat: FlatScan<f64> = timed("flat", &points);
    let kd: KdTree<f64> = timed("kdtree", &points);
    let quad: Quadtree<f64> = timed("quadtree", &points);

    for _ in 0..20 {
        let x = rng.random_range(-1000.0..1000.0);
        let y = rng.random_range(-1000.0..1000.0);
        let rect = Rect::from_origin_size((x, y), (rng.random_range(1.0..400.0), 20.0));
        let area = RectangleArea::from(rect);

        let expect = sorted(flat.find(&area));
        let scanned = flat.points().iter().filter(|p| area.contains(p)).count();
        assert_eq!(expect.len(), scanned);
        assert_eq!(sorted(kd.find(&area)), expect, "kdtree disagrees on {area}");
        assert_eq!(sorted(quad.find(&area)), expect, "quadtree disagrees on {area}");
        println!("{area}: {} points", expect.len());
    }
}

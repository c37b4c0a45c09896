// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! KD-tree basics.
//!
//! Build a tree over a handful of points with a seeded random source, print
//! its structure, and run a few rectangle queries.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_points_examples --example kdtree_basics`

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use understory_points::{Backend, KdTree, Point, RectangleArea};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let points = [
        Point::new(2.0, 3.0),
        Point::new(5.0, 4.0),
        Point::new(9.0, 6.0),
        Point::new(4.0, 7.0),
        Point::new(8.0, 1.0),
        Point::new(7.0, 2.0),
        // Ties on the split coordinate are spread across both halves.
        Point::new(5.0, 9.0),
    ];

    // Same seed, same tree.
    let tree = KdTree::build_with_rng(&points, &mut StdRng::seed_from_u64(42)).unwrap();
    println!(
        "{} points, height {}, bounds {}",
        tree.len(),
        tree.height(),
        tree.bounds()
    );
    for node in tree.nodes() {
        println!("{node}");
    }

    let area = RectangleArea::new(4.0, 2.0, 8.0, 7.0);
    let mut hits = tree.find(&area);
    hits.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap());
    println!("points in {area}: {hits:?}");
    assert_eq!(
        hits,
        [Point::new(4.0, 7.0), Point::new(5.0, 4.0), Point::new(7.0, 2.0)]
    );

    // Edges are closed.
    let edge = RectangleArea::new(9.0, 6.0, 20.0, 20.0);
    assert_eq!(tree.find(&edge), [Point::new(9.0, 6.0)]);

    // Nothing out there.
    assert!(tree.find(&RectangleArea::new(-5.0, -5.0, -1.0, -1.0)).is_empty());
}

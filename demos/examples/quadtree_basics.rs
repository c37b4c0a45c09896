// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Build a quadtree top-down, rebuild the same tree by inserting points one
//! at a time, and compare.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_points_examples --example quadtree_basics`

use tracing_subscriber::EnvFilter;
use understory_points::{Backend, IndexError, Point, Quadtree, QuadtreeConfig, RectangleArea};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let points: Vec<Point<f64>> = (0..40)
        .map(|i| {
            let t = f64::from(i);
            Point::new((t * 7.3) % 100.0, (t * 13.1) % 100.0)
        })
        .collect();

    let config = QuadtreeConfig::with_capacity(3);
    let built = Quadtree::build_with(&points, config).unwrap();
    println!("{} points, height {}", built.len(), built.height());
    for node in built.nodes() {
        println!("{node}");
    }

    // Inserting the same points into an empty tree over the same bounds
    // produces the same structure.
    let mut filled = Quadtree::new(built.bounds(), built.config()).unwrap();
    for p in &points {
        filled.insert(*p).unwrap();
    }
    assert!(built.nodes().eq(filled.nodes()));

    // Insertion is limited to the tree's bounds.
    let outside = Point::new(-1.0, 50.0);
    assert_eq!(filled.insert(outside), Err(IndexError::OutOfBounds));

    let area = RectangleArea::new(25.0, 25.0, 75.0, 75.0);
    let hits = built.find(&area);
    println!("{} points in {area}", hits.len());
    assert!(hits.iter().all(|p| area.contains(p)));
    assert_eq!(
        hits.len(),
        points.iter().filter(|p| area.contains(p)).count()
    );
}

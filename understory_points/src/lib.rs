// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_points --heading-base-level=0

//! Understory Points: static 2D point indexes for rectangle range queries.
//!
//! Build an index once from a set of points, then ask for every point inside
//! an axis-aligned rectangle as often as you like.
//!
//! - Rectangles are closed: points exactly on an edge are reported.
//! - Indexes are immutable after construction and can be shared between readers.
//! - Duplicate points are kept as distinct entries and reported once each.
//!
//! Backends are interchangeable behind the [`Backend`] trait, so they can be
//! compared and benchmarked against each other:
//!
//! - [`KdTree`]: splits on the lower median of alternating axes, found with
//!   randomized selection ([`select`]). Pivot randomness is injectable through
//!   [`KdTree::build_with_rng`].
//! - [`Quadtree`]: subdivides the bounding box into quadrants once a node holds
//!   more than [`QuadtreeConfig::capacity`] points. Can also be filled one point
//!   at a time with [`Quadtree::insert`].
//! - [`FlatScan`]: linear scan, the reference answer.
//!
//! Coordinates are generic over [`Scalar`] (`f32`, `f64`, `i64`).
//!
//! # Example
//!
//! ```rust
//! use understory_points::{Backend, KdTree, Point, Quadtree, RectangleArea};
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(1.0, 0.0),
//! ];
//! let kd = KdTree::build(&points).unwrap();
//! let quad = Quadtree::build(&points).unwrap();
//!
//! let area = RectangleArea::new(0.0, 0.8, 0.2, 1e18);
//! assert_eq!(kd.find(&area), [Point::new(0.0, 1.0)]);
//! assert_eq!(quad.find(&area), [Point::new(0.0, 1.0)]);
//! ```
//!
//! Deterministic construction with a seeded random source, and a structural dump:
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use understory_points::{KdTree, Point};
//!
//! let points: Vec<_> = (0_i64..8).map(|i| Point::new(i, 7 - i)).collect();
//! let tree = KdTree::build_with_rng(&points, &mut SmallRng::seed_from_u64(7)).unwrap();
//! for node in tree.nodes() {
//!     println!("{node}");
//! }
//! assert_eq!(tree.nodes().count(), 2 * points.len() - 1);
//! ```
//!
//! ## Choosing a backend
//!
//! - `KdTree`: build cost is expected O(n log n). Every internal node caches all
//!   leaves of its subtree, so a query that overlaps the data's bounding box tests
//!   every leaf.
//! - `Quadtree`: cheap to build, prunes whole quadrants during queries. Tune
//!   `capacity` to trade node count against per-node scans.
//! - `FlatScan`: no build cost; use it for tiny sets or to check other backends.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds may assert.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod error;
pub mod select;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::{FlatScan, FlatScanF32, FlatScanF64, FlatScanI64};
pub use backends::kdtree::{KdNodeKind, KdNodeView, KdTree, KdTreeF32, KdTreeF64, KdTreeI64};
pub use backends::quadtree::{
    QuadNodeView, Quadrant, Quadtree, QuadtreeConfig, QuadtreeF32, QuadtreeF64, QuadtreeI64,
};
pub use error::IndexError;
pub use types::{Axis, Point, RectangleArea, Scalar};

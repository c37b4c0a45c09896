// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, the reference answer).
//! - `kdtree`: randomized KD-tree over alternating-axis medians (aliases: `KdTreeF32`, `KdTreeF64`, `KdTreeI64`).
//! - `quadtree`: region quadtree with per-node capacity (aliases: `QuadtreeF32`, `QuadtreeF64`, `QuadtreeI64`).
//!
//! Query note
//! ----------
//! The KD-tree keeps, at every internal node, the flattened list of all leaves
//! beneath it, and a query walks that list once the root rectangle overlaps the
//! query. Query cost therefore grows with the number of points rather than with
//! tree height. The quadtree descends level by level and skips every quadrant
//! that does not overlap the query.

pub mod flatvec;
pub mod kdtree;
pub mod quadtree;

pub use flatvec::{FlatScanF32, FlatScanF64, FlatScanI64};
pub use kdtree::{KdTreeF32, KdTreeF64, KdTreeI64};
pub use quadtree::{QuadtreeF32, QuadtreeF64, QuadtreeI64};

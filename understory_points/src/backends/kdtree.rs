// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized KD-tree backend generic over scalar `T: Scalar`.
//!
//! Construction splits on the lower median of alternating axes (x on even
//! depths, y on odd depths), found with randomized selection. Points tied with
//! the median are dealt alternately to the smaller and larger side so that
//! repeated coordinates still produce a balanced split.
//!
//! Every internal node caches the flattened list of all leaves below it, and
//! queries walk that list after the node's own bounding check. A query
//! therefore prunes at the root and then tests leaves one by one; it does not
//! descend level by level.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::backend::Backend;
use crate::error::IndexError;
use crate::select::select_kth;
use crate::types::{Axis, Point, RectangleArea, Scalar, lt};

/// Seed used by [`KdTree::build`] without `std`, or when OS entropy is unavailable.
pub const DEFAULT_SEED: u64 = 0x5EED_C0FF_EE00_0F0F;

/// A static 2D KD-tree answering closed rectangle queries.
#[derive(Clone)]
pub struct KdTree<T: Scalar> {
    root: NodeIdx,
    arena: Vec<Node<T>>,
    len: usize,
    height: usize,
}

#[derive(Clone)]
enum Kind<T: Scalar> {
    Leaf(Point<T>),
    Internal {
        axis: Axis,
        median: T,
        smaller: NodeIdx,
        larger: NodeIdx,
        leaves: Vec<NodeIdx>,
    },
}

#[derive(Clone)]
struct Node<T: Scalar> {
    rect: RectangleArea<T>,
    depth: usize,
    kind: Kind<T>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// What a [`KdNodeView`] describes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KdNodeKind<T> {
    /// A leaf holding exactly one point.
    Leaf(Point<T>),
    /// An internal node split at `median` along `axis`.
    Split {
        /// Split axis.
        axis: Axis,
        /// Median coordinate on `axis`.
        median: T,
        /// Length of the node's flattened leaf cache.
        leaves: usize,
    },
}

/// Read-only snapshot of one node, yielded by [`KdTree::nodes`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KdNodeView<T> {
    /// Depth below the root (the root is 0).
    pub depth: usize,
    /// Rectangle the node is responsible for.
    pub rect: RectangleArea<T>,
    /// Leaf point or split line.
    pub kind: KdNodeKind<T>,
}

impl<T: Display> Display for KdNodeView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("  ")?;
        }
        match &self.kind {
            KdNodeKind::Leaf(p) => write!(f, "leaf {p} in {}", self.rect),
            KdNodeKind::Split {
                axis,
                median,
                leaves,
            } => {
                let name = match axis {
                    Axis::X => "x",
                    Axis::Y => "y",
                };
                write!(
                    f,
                    "split {name} = {median} over {} ({leaves} leaves)",
                    self.rect
                )
            }
        }
    }
}

impl<T: Scalar> KdTree<T> {
    /// Build a tree using `rng` for pivot selection.
    ///
    /// The root rectangle is the tight bounding box of `points`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::EmptyInput`] if `points` is empty.
    pub fn build_with_rng<R: Rng + ?Sized>(
        points: &[Point<T>],
        rng: &mut R,
    ) -> Result<Self, IndexError> {
        let bounds = RectangleArea::bounding(points).ok_or(IndexError::EmptyInput)?;
        let mut arena = Vec::with_capacity(2 * points.len() - 1);
        let root = Self::build_node(
            &mut arena,
            points.to_vec(),
            0,
            Axis::for_depth(0),
            bounds,
            rng,
        );
        let height = arena.iter().map(|n| n.depth).max().unwrap_or(0);
        tracing::debug!(
            points = points.len(),
            nodes = arena.len(),
            height,
            "built kd-tree"
        );
        Ok(Self {
            root,
            arena,
            len: points.len(),
            height,
        })
    }

    /// Bounding rectangle of all stored points.
    pub fn bounds(&self) -> RectangleArea<T> {
        self.arena[self.root.get()].rect
    }

    /// Depth of the deepest node (0 for a single point).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pre-order traversal of all nodes: a node, then its smaller side, then
    /// its larger side.
    pub fn nodes(&self) -> impl Iterator<Item = KdNodeView<T>> + '_ {
        let mut stack = vec![self.root];
        core::iter::from_fn(move || {
            let idx = stack.pop()?;
            let node = &self.arena[idx.get()];
            let kind = match &node.kind {
                Kind::Leaf(p) => KdNodeKind::Leaf(*p),
                Kind::Internal {
                    axis,
                    median,
                    smaller,
                    larger,
                    leaves,
                } => {
                    stack.push(*larger);
                    stack.push(*smaller);
                    KdNodeKind::Split {
                        axis: *axis,
                        median: *median,
                        leaves: leaves.len(),
                    }
                }
            };
            Some(KdNodeView {
                depth: node.depth,
                rect: node.rect,
                kind,
            })
        })
    }

    fn push(arena: &mut Vec<Node<T>>, node: Node<T>) -> NodeIdx {
        arena.push(node);
        NodeIdx::new(arena.len() - 1)
    }

    fn build_node<R: Rng + ?Sized>(
        arena: &mut Vec<Node<T>>,
        mut points: Vec<Point<T>>,
        depth: usize,
        axis: Axis,
        rect: RectangleArea<T>,
        rng: &mut R,
    ) -> NodeIdx {
        debug_assert!(!points.is_empty(), "kd-tree buckets are never empty");
        if points.len() == 1 {
            let kind = Kind::Leaf(points[0]);
            return Self::push(arena, Node { rect, depth, kind });
        }

        let last = points.len() - 1;
        let median = select_kth(&mut points, 0, last, last / 2, axis, rng).coord(axis);
        let (smaller_points, larger_points) = Self::split_at_median(&points, axis, median);
        let (smaller_rect, larger_rect) = rect.split(axis, median);
        let next = axis.other();
        let smaller = Self::build_node(arena, smaller_points, depth + 1, next, smaller_rect, rng);
        let larger = Self::build_node(arena, larger_points, depth + 1, next, larger_rect, rng);

        let mut leaves = Vec::new();
        for child in [smaller, larger] {
            match &arena[child.get()].kind {
                Kind::Leaf(_) => leaves.push(child),
                Kind::Internal { leaves: nested, .. } => leaves.extend_from_slice(nested),
            }
        }
        let kind = Kind::Internal {
            axis,
            median,
            smaller,
            larger,
            leaves,
        };
        Self::push(arena, Node { rect, depth, kind })
    }

    /// Deal every point to the smaller or larger side of `median`.
    ///
    /// Ties alternate sides, counted across the whole call: the first tie goes
    /// to the smaller side, the second to the larger, and so on. With at least
    /// two points both sides end up non-empty.
    fn split_at_median(
        points: &[Point<T>],
        axis: Axis,
        median: T,
    ) -> (Vec<Point<T>>, Vec<Point<T>>) {
        let mut smaller = Vec::with_capacity(points.len() / 2 + 1);
        let mut larger = Vec::with_capacity(points.len() / 2 + 1);
        let mut ties = 0_usize;
        for p in points {
            let v = p.coord(axis);
            if lt(v, median) {
                smaller.push(*p);
            } else if lt(median, v) {
                larger.push(*p);
            } else {
                if ties % 2 == 0 {
                    smaller.push(*p);
                } else {
                    larger.push(*p);
                }
                ties += 1;
            }
        }
        (smaller, larger)
    }

    fn find_in(&self, idx: NodeIdx, area: &RectangleArea<T>, out: &mut Vec<Point<T>>) {
        let node = &self.arena[idx.get()];
        if !area.intersects(&node.rect) {
            return;
        }
        match &node.kind {
            Kind::Leaf(p) => {
                if area.contains(p) {
                    out.push(*p);
                }
            }
            Kind::Internal { leaves, .. } => {
                for &leaf in leaves {
                    self.find_in(leaf, area, out);
                }
            }
        }
    }
}

#[cfg(feature = "std")]
fn default_rng() -> SmallRng {
    SmallRng::try_from_os_rng().unwrap_or_else(|err| {
        tracing::warn!(%err, "OS entropy unavailable, seeding pivots with DEFAULT_SEED");
        SmallRng::seed_from_u64(DEFAULT_SEED)
    })
}

#[cfg(not(feature = "std"))]
fn default_rng() -> SmallRng {
    SmallRng::seed_from_u64(DEFAULT_SEED)
}

impl<T: Scalar> Backend<T> for KdTree<T> {
    fn build(points: &[Point<T>]) -> Result<Self, IndexError> {
        Self::build_with_rng(points, &mut default_rng())
    }

    fn find(&self, area: &RectangleArea<T>) -> Vec<Point<T>> {
        let mut out = Vec::new();
        if area.is_empty() {
            return out;
        }
        self.find_in(self.root, area, &mut out);
        out
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Scalar> Debug for KdTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("points", &self.len)
            .field("nodes", &self.arena.len())
            .field("height", &self.height)
            .field("bounds", &self.bounds())
            .finish_non_exhaustive()
    }
}

/// KD-tree over `f32` coordinates.
pub type KdTreeF32 = KdTree<f32>;
/// KD-tree over `f64` coordinates.
pub type KdTreeF64 = KdTree<f64>;
/// KD-tree over `i64` coordinates.
pub type KdTreeI64 = KdTree<i64>;

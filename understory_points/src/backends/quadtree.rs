// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend generic over scalar `T: Scalar`.
//!
//! A node stores up to `capacity` points. Once it holds more, it splits its
//! rectangle at the center into four quadrants and hands every point down;
//! a subdivided node keeps no points of its own. Points on a dividing line go
//! to the left and/or lower quadrant.
//!
//! Trees can be built top-down from a full point set ([`Quadtree::build_with`])
//! or filled one point at a time ([`Quadtree::insert`]). Given the same points
//! in the same order both produce identical trees.
//!
//! A node over capacity stays a leaf only when splitting it would not separate
//! anything: its points all coincide, or they would all land in a quadrant as
//! large as the node itself (the center rounds onto a corner). Otherwise leaves
//! hold at most `capacity` points. An optional `max_depth` caps subdivision
//! below that.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display};

use crate::backend::Backend;
use crate::error::IndexError;
use crate::types::{Point, RectangleArea, Scalar, le};

/// Construction parameters for a [`Quadtree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadtreeConfig {
    /// Maximum number of points a node holds before it subdivides.
    pub capacity: usize,
    /// Depth at which nodes stop subdividing regardless of capacity.
    /// `None` subdivides until points separate.
    pub max_depth: Option<usize>,
}

impl QuadtreeConfig {
    /// Default node capacity.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Default parameters with a custom node capacity.
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            max_depth: None,
        }
    }

    /// Stop subdividing at `max_depth`.
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..self
        }
    }

    fn validate(&self) -> Result<(), IndexError> {
        if self.capacity == 0 {
            return Err(IndexError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

/// One of the four children of a subdivided node. "Upper" means larger y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Smaller x, larger y.
    UpperLeft,
    /// Larger x, larger y.
    UpperRight,
    /// Smaller x, smaller y.
    LowerLeft,
    /// Larger x, smaller y.
    LowerRight,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Position in [`Quadrant::ALL`] and in [`RectangleArea::quadrants`].
    pub const fn index(self) -> usize {
        match self {
            Self::UpperLeft => 0,
            Self::UpperRight => 1,
            Self::LowerLeft => 2,
            Self::LowerRight => 3,
        }
    }

    /// The quadrant around `center` that receives `p`.
    ///
    /// Ties on the dividing lines resolve to the left and lower side.
    pub fn of<T: Scalar>(center: &Point<T>, p: &Point<T>) -> Self {
        match (le(p.x, center.x), le(p.y, center.y)) {
            (true, true) => Self::LowerLeft,
            (false, true) => Self::LowerRight,
            (true, false) => Self::UpperLeft,
            (false, false) => Self::UpperRight,
        }
    }
}

/// A static 2D quadtree answering closed rectangle queries.
#[derive(Clone)]
pub struct Quadtree<T: Scalar> {
    root: QuadNode<T>,
    config: QuadtreeConfig,
    len: usize,
}

#[derive(Clone)]
struct QuadNode<T: Scalar> {
    rect: RectangleArea<T>,
    depth: usize,
    points: Vec<Point<T>>,
    children: Option<Box<[QuadNode<T>; 4]>>,
}

/// Read-only snapshot of one node, yielded by [`Quadtree::nodes`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadNodeView<'a, T> {
    /// Depth below the root (the root is 0).
    pub depth: usize,
    /// Rectangle the node covers.
    pub rect: RectangleArea<T>,
    /// Points stored directly at this node (empty once subdivided).
    pub points: &'a [Point<T>],
    /// Whether the node has four children.
    pub subdivided: bool,
}

impl<T: Display> Display for QuadNodeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("  ")?;
        }
        if self.subdivided {
            write!(f, "quad {} (subdivided)", self.rect)
        } else {
            write!(f, "quad {} with {} points", self.rect, self.points.len())
        }
    }
}

impl<T: Scalar> QuadNode<T> {
    const fn leaf(rect: RectangleArea<T>, depth: usize, points: Vec<Point<T>>) -> Self {
        Self {
            rect,
            depth,
            points,
            children: None,
        }
    }

    fn can_subdivide(&self, config: &QuadtreeConfig) -> bool {
        self.points.len() > config.capacity
            && config.max_depth.is_none_or(|max| self.depth < max)
            && self.split_separates()
    }

    /// Whether splitting at the center makes progress: the points are not all
    /// coincident, and they either spread over several quadrants or land in one
    /// that is smaller than this node.
    ///
    /// Adding points never turns this from true to false, so top-down and
    /// insert-driven construction subdivide the same nodes.
    fn split_separates(&self) -> bool {
        let Some((first, rest)) = self.points.split_first() else {
            return false;
        };
        if rest.iter().all(|p| p == first) {
            return false;
        }
        let center = self.rect.center();
        let q = Quadrant::of(&center, first);
        if rest.iter().any(|p| Quadrant::of(&center, p) != q) {
            return true;
        }
        self.rect.quadrants()[q.index()] != self.rect
    }

    fn build(
        rect: RectangleArea<T>,
        depth: usize,
        points: Vec<Point<T>>,
        config: &QuadtreeConfig,
    ) -> Self {
        let node = Self::leaf(rect, depth, points);
        if !node.can_subdivide(config) {
            return node;
        }
        tracing::trace!(depth, points = node.points.len(), "subdividing quadtree node");

        let center = rect.center();
        let mut buckets: [Vec<Point<T>>; 4] = Default::default();
        for p in node.points {
            buckets[Quadrant::of(&center, &p).index()].push(p);
        }
        let [ul, ur, ll, lr] = rect.quadrants();
        let [ul_pts, ur_pts, ll_pts, lr_pts] = buckets;
        Self {
            rect,
            depth,
            points: Vec::new(),
            children: Some(Box::new([
                Self::build(ul, depth + 1, ul_pts, config),
                Self::build(ur, depth + 1, ur_pts, config),
                Self::build(ll, depth + 1, ll_pts, config),
                Self::build(lr, depth + 1, lr_pts, config),
            ])),
        }
    }

    fn insert(&mut self, p: Point<T>, config: &QuadtreeConfig) {
        if let Some(children) = &mut self.children {
            let q = Quadrant::of(&self.rect.center(), &p);
            children[q.index()].insert(p, config);
            return;
        }
        self.points.push(p);
        if self.can_subdivide(config) {
            self.subdivide(config);
        }
    }

    fn subdivide(&mut self, config: &QuadtreeConfig) {
        tracing::trace!(
            depth = self.depth,
            points = self.points.len(),
            "subdividing quadtree node"
        );
        let depth = self.depth + 1;
        let children = self
            .rect
            .quadrants()
            .map(|rect| Self::leaf(rect, depth, Vec::new()));
        self.children = Some(Box::new(children));
        for p in core::mem::take(&mut self.points) {
            self.insert(p, config);
        }
    }

    fn find_in(&self, area: &RectangleArea<T>, out: &mut Vec<Point<T>>) {
        if !area.intersects(&self.rect) {
            return;
        }
        match &self.children {
            None => out.extend(self.points.iter().filter(|p| area.contains(p)).copied()),
            Some(children) => {
                for child in children.iter() {
                    child.find_in(area, out);
                }
            }
        }
    }

    fn view(&self) -> QuadNodeView<'_, T> {
        QuadNodeView {
            depth: self.depth,
            rect: self.rect,
            points: &self.points,
            subdivided: self.children.is_some(),
        }
    }
}

impl<T: Scalar> Quadtree<T> {
    /// Create an empty tree covering `bounds`, to be filled with
    /// [`Quadtree::insert`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::ZeroCapacity`] if `config.capacity` is 0.
    pub fn new(bounds: RectangleArea<T>, config: QuadtreeConfig) -> Result<Self, IndexError> {
        config.validate()?;
        Ok(Self {
            root: QuadNode::leaf(bounds, 0, Vec::new()),
            config,
            len: 0,
        })
    }

    /// Build a tree top-down over the tight bounding box of `points`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::ZeroCapacity`] for a zero capacity and
    /// [`IndexError::EmptyInput`] if `points` is empty.
    pub fn build_with(points: &[Point<T>], config: QuadtreeConfig) -> Result<Self, IndexError> {
        config.validate()?;
        let bounds = RectangleArea::bounding(points).ok_or(IndexError::EmptyInput)?;
        let root = QuadNode::build(bounds, 0, points.to_vec(), &config);
        let tree = Self {
            root,
            config,
            len: points.len(),
        };
        tracing::debug!(
            points = tree.len,
            capacity = config.capacity,
            nodes = tree.nodes().count(),
            height = tree.height(),
            "built quadtree"
        );
        Ok(tree)
    }

    /// Insert one point, subdividing the receiving node if it overflows.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::OutOfBounds`] if `p` lies outside [`Quadtree::bounds`].
    pub fn insert(&mut self, p: Point<T>) -> Result<(), IndexError> {
        if !self.root.rect.contains(&p) {
            return Err(IndexError::OutOfBounds);
        }
        self.root.insert(p, &self.config);
        self.len += 1;
        Ok(())
    }

    /// Rectangle covered by the root node.
    pub fn bounds(&self) -> RectangleArea<T> {
        self.root.rect
    }

    /// Construction parameters.
    pub fn config(&self) -> QuadtreeConfig {
        self.config
    }

    /// Depth of the deepest node (0 when the root was never subdivided).
    pub fn height(&self) -> usize {
        self.nodes().map(|v| v.depth).max().unwrap_or(0)
    }

    /// Pre-order traversal of all nodes. Children are visited upper-left,
    /// upper-right, lower-left, lower-right.
    pub fn nodes(&self) -> impl Iterator<Item = QuadNodeView<'_, T>> + '_ {
        let mut stack = vec![&self.root];
        core::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(children) = &node.children {
                stack.extend(children.iter().rev());
            }
            Some(node.view())
        })
    }
}

impl<T: Scalar> Backend<T> for Quadtree<T> {
    fn build(points: &[Point<T>]) -> Result<Self, IndexError> {
        Self::build_with(points, QuadtreeConfig::default())
    }

    fn find(&self, area: &RectangleArea<T>) -> Vec<Point<T>> {
        let mut out = Vec::new();
        if area.is_empty() {
            return out;
        }
        self.root.find_in(area, &mut out);
        out
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Scalar> Debug for Quadtree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quadtree")
            .field("points", &self.len)
            .field("capacity", &self.config.capacity)
            .field("max_depth", &self.config.max_depth)
            .field("bounds", &self.root.rect)
            .finish_non_exhaustive()
    }
}

/// Quadtree over `f32` coordinates.
pub type QuadtreeF32 = Quadtree<f32>;
/// Quadtree over `f64` coordinates.
pub type QuadtreeF64 = Quadtree<f64>;
/// Quadtree over `i64` coordinates.
pub type QuadtreeI64 = Quadtree<i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    fn grid(n: i64) -> Vec<Point<i64>> {
        let mut out = Vec::new();
        for y in 0..n {
            for x in 0..n {
                out.push(Point::new(x * 10, y * 10));
            }
        }
        out
    }

    #[test]
    fn stays_a_leaf_up_to_capacity() {
        let pts = [Point::new(0, 0), Point::new(0, 1), Point::new(1, 1), Point::new(1, 0)];
        let tree = QuadtreeI64::build(&pts).unwrap();
        assert_eq!(tree.nodes().count(), 1);
        assert_eq!(tree.height(), 0);
        assert_eq!(
            tree.find(&RectangleArea::new(0, 1, 0, 100)),
            [Point::new(0, 1)]
        );
    }

    #[test]
    fn subdivides_past_capacity() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(1.0, 1.0),
        ];
        let tree = QuadtreeF64::build(&pts).unwrap();
        let views: Vec<_> = tree.nodes().collect();
        assert_eq!(views.len(), 5);
        assert!(views[0].subdivided);
        assert!(views[0].points.is_empty(), "subdivided nodes hold no points");
        // upper-left, upper-right, lower-left, lower-right
        assert_eq!(views[1].points, [Point::new(0.0, 4.0)]);
        assert_eq!(views[2].points, [Point::new(4.0, 4.0)]);
        assert_eq!(views[3].points, [Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(views[4].points, [Point::new(4.0, 0.0)]);
        assert_eq!(views[3].rect, RectangleArea::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn dividing_lines_go_left_and_down() {
        let c = Point::new(5_i64, 5);
        assert_eq!(Quadrant::of(&c, &Point::new(5, 5)), Quadrant::LowerLeft);
        assert_eq!(Quadrant::of(&c, &Point::new(6, 5)), Quadrant::LowerRight);
        assert_eq!(Quadrant::of(&c, &Point::new(5, 6)), Quadrant::UpperLeft);
        assert_eq!(Quadrant::of(&c, &Point::new(6, 6)), Quadrant::UpperRight);
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::ALL[q.index()], q);
        }
    }

    #[test]
    fn insert_matches_top_down_build() {
        let pts = grid(9);
        let config = QuadtreeConfig::with_capacity(3);
        let built = Quadtree::build_with(&pts, config).unwrap();
        let mut filled = Quadtree::new(built.bounds(), config).unwrap();
        for p in &pts {
            filled.insert(*p).unwrap();
        }
        assert_eq!(filled.len(), built.len());
        assert!(
            built.nodes().eq(filled.nodes()),
            "both construction styles must produce the same tree"
        );
    }

    /// Every leaf respects `capacity` unless its points all coincide.
    fn assert_leaves_within_capacity<T: Scalar>(tree: &Quadtree<T>) {
        let capacity = tree.config().capacity;
        for v in tree.nodes().filter(|v| !v.subdivided) {
            let coincident = v.points.iter().all(|p| *p == v.points[0]);
            assert!(
                v.points.len() <= capacity || coincident,
                "leaf at depth {} holds {} distinct points",
                v.depth,
                v.points.len()
            );
        }
    }

    #[test]
    fn close_distinct_points_keep_splitting() {
        let mut pts = vec![Point::new(1.0, 1.0)];
        pts.extend((0..6).map(|i| Point::new(f64::from(i) * 1e-12, 0.0)));
        let tree = Quadtree::build(&pts).unwrap();
        assert!(tree.height() > 32, "height {}", tree.height());
        assert_leaves_within_capacity(&tree);
        let near_origin = RectangleArea::new(0.0, 0.0, 2.5e-12, 0.0);
        assert_eq!(tree.find(&near_origin).len(), 3);

        let mut filled = Quadtree::new(tree.bounds(), tree.config()).unwrap();
        for p in &pts {
            filled.insert(*p).unwrap();
        }
        assert!(tree.nodes().eq(filled.nodes()));
    }

    #[test]
    fn coincident_points_stay_together() {
        let same = [Point::new(1.0, 1.0); 6];
        let tree = Quadtree::build_with(&same, QuadtreeConfig::with_capacity(2)).unwrap();
        assert_eq!(tree.nodes().count(), 1);
        assert_eq!(tree.height(), 0);

        let mut pts = same.to_vec();
        pts.push(Point::new(0.0, 0.0));
        let config = QuadtreeConfig::with_capacity(2);
        let tree = Quadtree::build_with(&pts, config).unwrap();
        assert_eq!(tree.height(), 1);
        let views: Vec<_> = tree.nodes().collect();
        assert_eq!(views[2].points.len(), 6, "upper-right keeps the stack");
        assert_eq!(views[3].points, [Point::new(0.0, 0.0)]);
        assert_eq!(tree.find(&RectangleArea::new(0.5, 0.5, 2.0, 2.0)).len(), 6);
        assert_leaves_within_capacity(&tree);

        let mut filled = Quadtree::new(tree.bounds(), config).unwrap();
        for p in pts {
            filled.insert(p).unwrap();
        }
        assert!(tree.nodes().eq(filled.nodes()));
    }

    #[test]
    fn unit_integer_cells_still_separate() {
        let pts = [
            Point::new(0_i64, 0),
            Point::new(1, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(1, 1),
        ];
        let tree = Quadtree::build_with(&pts, QuadtreeConfig::with_capacity(1)).unwrap();
        assert_leaves_within_capacity(&tree);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.find(&RectangleArea::new(1, 1, 1, 1)).len(), 2);
    }

    #[test]
    fn max_depth_is_an_opt_in_cap() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1e-3, 0.0),
            Point::new(1.0, 1.0),
        ];
        let config = QuadtreeConfig::with_capacity(1).with_max_depth(2);
        let tree = Quadtree::build_with(&pts, config).unwrap();
        assert_eq!(tree.height(), 2);
        let deepest = tree
            .nodes()
            .find(|v| v.depth == 2 && !v.points.is_empty())
            .unwrap();
        assert_eq!(deepest.points.len(), 2);
        assert_eq!(tree.find(&RectangleArea::new(0.0, 0.0, 0.1, 0.1)).len(), 2);

        let uncapped = Quadtree::build_with(&pts, QuadtreeConfig::with_capacity(1)).unwrap();
        assert!(uncapped.height() > 2);
        assert_leaves_within_capacity(&uncapped);
    }

    #[test]
    fn query_prunes_disjoint_rectangles() {
        let tree = Quadtree::build_with(&grid(8), QuadtreeConfig::with_capacity(1)).unwrap();
        assert!(tree.find(&RectangleArea::new(100, 100, 200, 200)).is_empty());
        assert_eq!(tree.find(&RectangleArea::new(10, 10, 20, 20)).len(), 4);
        assert_eq!(tree.find(&RectangleArea::new(0, 0, 70, 70)).len(), 64);
    }

    #[test]
    fn errors() {
        assert_eq!(
            QuadtreeF64::build(&[]).unwrap_err(),
            IndexError::EmptyInput
        );
        assert_eq!(
            Quadtree::build_with(&[Point::new(0_i64, 0)], QuadtreeConfig::with_capacity(0))
                .unwrap_err(),
            IndexError::ZeroCapacity
        );
        let bounds = RectangleArea::new(0_i64, 0, 10, 10);
        let mut tree = Quadtree::new(bounds, QuadtreeConfig::default()).unwrap();
        assert_eq!(tree.insert(Point::new(11, 0)), Err(IndexError::OutOfBounds));
        assert_eq!(tree.insert(Point::new(10, 0)), Ok(()));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn dump_lines() {
        let pts = [Point::new(0_i64, 0), Point::new(4, 4), Point::new(0, 4)];
        let tree = Quadtree::build_with(&pts, QuadtreeConfig::with_capacity(2)).unwrap();
        let dump: Vec<String> = tree.nodes().map(|v| v.to_string()).collect();
        assert_eq!(
            dump,
            [
                "quad [0, 4] x [0, 4] (subdivided)",
                "  quad [0, 2] x [2, 4] with 1 points",
                "  quad [2, 4] x [2, 4] with 1 points",
                "  quad [0, 2] x [0, 2] with 1 points",
                "  quad [2, 4] x [0, 2] with 0 points",
            ]
        );
    }
}

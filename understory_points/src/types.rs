// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};

/// Numeric scalar abstraction for point coordinates.
///
/// Backends only need ordering, a midpoint for subdividing rectangles, and a
/// canonical bit pattern so that points can be hashed consistently with `==`.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Midpoint between a and b (used for quadrant subdivision).
    fn mid(a: Self, b: Self) -> Self;

    /// Canonical bit pattern of the value. Values that compare equal must
    /// produce identical bits.
    fn hash_bits(v: Self) -> u64;
}

impl Scalar for f32 {
    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * a + 0.5 * b
    }

    #[inline]
    fn hash_bits(v: Self) -> u64 {
        // `-0.0 + 0.0` is `+0.0`, so both zeros share one pattern.
        u64::from((v + 0.0).to_bits())
    }
}

impl Scalar for f64 {
    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * a + 0.5 * b
    }

    #[inline]
    fn hash_bits(v: Self) -> u64 {
        (v + 0.0).to_bits()
    }
}

impl Scalar for i64 {
    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn hash_bits(v: Self) -> u64 {
        v as u64
    }
}

/// Coordinate axis used to split points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x coordinate.
    X,
    /// The y coordinate.
    Y,
}

impl Axis {
    /// Split axis for a tree depth: x on even depths, y on odd depths.
    pub const fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Self::X } else { Self::Y }
    }

    /// The other axis.
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// A point in 2D.
///
/// Equality is exact coordinate equality, with no tolerance. Hashing agrees
/// with equality, so points can be collected into hash sets.
#[derive(Copy, Clone, Debug, Default)]
pub struct Point<T> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Create a new point.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy> Point<T> {
    /// The coordinate along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl<T: PartialEq> PartialEq for Point<T> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// Coordinates are assumed NaN-free, which makes equality reflexive.
impl<T: Scalar> Eq for Point<T> {}

impl<T: Scalar> Hash for Point<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        T::hash_bits(self.x).hash(state);
        T::hash_bits(self.y).hash(state);
    }
}

impl<T: Display> Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Closed axis-aligned rectangle in 2D.
///
/// All four bounds are inclusive: a point lying exactly on an edge is
/// contained, and rectangles that only touch along an edge or corner
/// intersect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RectangleArea<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (bottom)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (top)
    pub max_y: T,
}

impl<T: Copy + PartialOrd + Debug> RectangleArea<T> {
    /// Create a new rectangle from min/max bounds.
    ///
    /// Debug builds assert `min_x <= max_x` and `min_y <= max_y`.
    pub fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        debug_assert!(
            le(min_x, max_x) && le(min_y, max_y),
            "inverted rectangle: ({min_x:?}, {min_y:?}) .. ({max_x:?}, {max_y:?})"
        );
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point<T>, b: Point<T>) -> Self {
        Self {
            min_x: min_t(a.x, b.x),
            min_y: min_t(a.y, b.y),
            max_x: max_t(a.x, b.x),
            max_y: max_t(a.y, b.y),
        }
    }

    /// The tightest rectangle containing every point, or `None` when empty.
    pub fn bounding(points: &[Point<T>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut out = Self::from_corners(*first, *first);
        for p in rest {
            out.min_x = min_t(out.min_x, p.x);
            out.min_y = min_t(out.min_y, p.y);
            out.max_x = max_t(out.max_x, p.x);
            out.max_y = max_t(out.max_y, p.y);
        }
        Some(out)
    }

    /// Whether the closed rectangle contains the point.
    pub fn contains(&self, p: &Point<T>) -> bool {
        le(self.min_x, p.x) && le(p.x, self.max_x) && le(self.min_y, p.y) && le(p.y, self.max_y)
    }

    /// Whether two closed rectangles overlap. Touching edges count.
    pub fn intersects(&self, other: &Self) -> bool {
        le(self.min_x, other.max_x)
            && le(other.min_x, self.max_x)
            && le(self.min_y, other.max_y)
            && le(other.min_y, self.max_y)
    }

    /// Return true if the rectangle is inverted (contains nothing). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// Clip at `value` along `axis`, returning the `(lower, upper)` halves.
    ///
    /// Both halves are closed and share the split line.
    pub fn split(&self, axis: Axis, value: T) -> (Self, Self) {
        match axis {
            Axis::X => (
                Self {
                    max_x: value,
                    ..*self
                },
                Self {
                    min_x: value,
                    ..*self
                },
            ),
            Axis::Y => (
                Self {
                    max_y: value,
                    ..*self
                },
                Self {
                    min_y: value,
                    ..*self
                },
            ),
        }
    }
}

impl<T: Scalar> RectangleArea<T> {
    /// The center point.
    pub fn center(&self) -> Point<T> {
        Point::new(T::mid(self.min_x, self.max_x), T::mid(self.min_y, self.max_y))
    }

    /// The four quadrants split at the center, ordered
    /// `[upper_left, upper_right, lower_left, lower_right]`.
    ///
    /// "Upper" means larger y.
    pub fn quadrants(&self) -> [Self; 4] {
        let c = self.center();
        [
            Self {
                min_x: self.min_x,
                min_y: c.y,
                max_x: c.x,
                max_y: self.max_y,
            },
            Self {
                min_x: c.x,
                min_y: c.y,
                max_x: self.max_x,
                max_y: self.max_y,
            },
            Self {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: c.x,
                max_y: c.y,
            },
            Self {
                min_x: c.x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: c.y,
            },
        ]
    }
}

impl<T: Display> Display for RectangleArea<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Point> for Point<f64> {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for RectangleArea<f64> {
    fn from(r: kurbo::Rect) -> Self {
        Self::from_corners(Point::new(r.x0, r.y0), Point::new(r.x1, r.y1))
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

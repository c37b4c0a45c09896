// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait shared by every point index.

use alloc::vec::Vec;

use crate::error::IndexError;
use crate::types::{Point, RectangleArea, Scalar};

/// A static point index: built once, then queried any number of times.
///
/// Backends are interchangeable behind this trait so they can be tested and
/// benchmarked against each other.
pub trait Backend<T: Scalar>: Sized {
    /// Build the index over `points` with the backend's default parameters.
    ///
    /// Duplicate points are kept as distinct entries.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::EmptyInput`] if `points` is empty.
    fn build(points: &[Point<T>]) -> Result<Self, IndexError>;

    /// Every stored point contained in the closed rectangle `area`, in no
    /// particular order.
    fn find(&self, area: &RectangleArea<T>) -> Vec<Point<T>>;

    /// Number of stored points.
    fn len(&self) -> usize;

    /// Whether the index stores no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; the reference
//! answer every other backend must agree with.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::error::IndexError;
use crate::types::{Point, RectangleArea, Scalar};

/// Flat vector backend with linear scans.
#[derive(Clone)]
pub struct FlatScan<T: Scalar> {
    points: Vec<Point<T>>,
}

impl<T: Scalar> FlatScan<T> {
    /// The stored points, in input order.
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }
}

impl<T: Scalar> Debug for FlatScan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatScan")
            .field("points", &self.points.len())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Backend<T> for FlatScan<T> {
    fn build(points: &[Point<T>]) -> Result<Self, IndexError> {
        if points.is_empty() {
            return Err(IndexError::EmptyInput);
        }
        Ok(Self {
            points: points.to_vec(),
        })
    }

    fn find(&self, area: &RectangleArea<T>) -> Vec<Point<T>> {
        self.points
            .iter()
            .filter(|p| area.contains(p))
            .copied()
            .collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Flat scan over `f32` coordinates.
pub type FlatScanF32 = FlatScan<f32>;
/// Flat scan over `f64` coordinates.
pub type FlatScanF64 = FlatScan<f64>;
/// Flat scan over `i64` coordinates.
pub type FlatScanI64 = FlatScan<i64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_closed_containment() {
        let pts = [
            Point::new(0_i64, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(1, 0),
        ];
        let idx = FlatScan::build(&pts).unwrap();
        assert_eq!(idx.len(), 4);
        assert_eq!(
            idx.find(&RectangleArea::new(0, 1, 0, 5)),
            [Point::new(0, 1)]
        );
        assert_eq!(idx.find(&RectangleArea::new(0, 0, 1, 1)).len(), 4);
        assert!(idx.find(&RectangleArea::new(2, 2, 3, 3)).is_empty());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            FlatScan::<f64>::build(&[]).unwrap_err(),
            IndexError::EmptyInput
        );
    }
}

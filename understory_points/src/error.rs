// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for index construction.

use thiserror::Error;

/// Errors reported while building or filling an index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    /// An index was built over zero points.
    #[error("cannot build an index over an empty point set")]
    EmptyInput,

    /// A quadtree was configured to hold zero points per node.
    #[error("quadtree node capacity must be at least 1")]
    ZeroCapacity,

    /// A point was inserted outside the quadtree's root rectangle.
    #[error("point lies outside the index bounds")]
    OutOfBounds,
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized order-statistic selection (quickselect).
//!
//! [`select_nth_by`] finds the element that would sit at absolute index `k`
//! if `items[l..=r]` were sorted by a key, reordering the range in place.
//! After it returns, every element left of `k` (within the range) has a key
//! `<=` the selected one and every element right of it has a key `>=`.
//! This is a partial order on one key only; the range is not sorted.
//!
//! Pivots are drawn uniformly from the current range, which gives expected
//! linear time. Only the side holding `k` is visited after each partition.
//!
//! The key function is what lets the routine work in any number of
//! dimensions; [`select_kth`] is the 2D point specialization used by the
//! KD-tree.

use rand::Rng;

use crate::types::{Axis, Point, lt};

/// Select the `k`-th smallest element of `items[l..=r]` by `key`.
///
/// Returns the index of the selected element, which is always `k`.
///
/// # Panics
///
/// Panics unless `l <= k <= r < items.len()`.
pub fn select_nth_by<E, K, F, R>(
    items: &mut [E],
    mut l: usize,
    mut r: usize,
    k: usize,
    key: F,
    rng: &mut R,
) -> usize
where
    K: PartialOrd,
    F: Fn(&E) -> K,
    R: Rng + ?Sized,
{
    assert!(
        l <= k && k <= r && r < items.len(),
        "selection rank {k} outside [{l}, {r}] (len {})",
        items.len()
    );
    loop {
        let pivot = partition_random(items, l, r, &key, rng);
        if pivot == k {
            return pivot;
        }
        // `l <= k < pivot` keeps `pivot - 1` from underflowing.
        if pivot > k {
            r = pivot - 1;
        } else {
            l = pivot + 1;
        }
    }
}

/// Select the point whose `axis` coordinate is the `k`-th smallest in
/// `points[l..=r]`, partially reordering the range.
///
/// # Panics
///
/// Panics unless `l <= k <= r < points.len()`.
pub fn select_kth<T, R>(
    points: &mut [Point<T>],
    l: usize,
    r: usize,
    k: usize,
    axis: Axis,
    rng: &mut R,
) -> Point<T>
where
    T: Copy + PartialOrd,
    R: Rng + ?Sized,
{
    let i = select_nth_by(points, l, r, k, |p| p.coord(axis), rng);
    points[i]
}

/// Move a uniformly random pivot to `r`, then partition `items[l..=r]` into
/// `< pivot`, pivot, `>= pivot`. Returns the pivot's final index.
fn partition_random<E, K, F, R>(items: &mut [E], l: usize, r: usize, key: &F, rng: &mut R) -> usize
where
    K: PartialOrd,
    F: Fn(&E) -> K,
    R: Rng + ?Sized,
{
    let chosen = rng.random_range(l..=r);
    items.swap(chosen, r);
    let pivot = key(&items[r]);
    let mut boundary = l;
    for j in l..r {
        if lt(&key(&items[j]), &pivot) {
            items.swap(boundary, j);
            boundary += 1;
        }
    }
    items.swap(boundary, r);
    boundary
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment of two boundary lists into one refined list.
//!
//! A merger walks the merged intervals in order and reports, for each one, the cell index it
//! falls in on the left list, on the right list, and in the merged list.
//! Side indices may be `-1` or `cells` when the interval lies outside that side; grids treat
//! those as empty.
//!
//! Strategies, picked by [`GridMerger::new`]:
//!
//! - `Uniform`: both sides are power-of-two subdivisions of `[0, 1]` and
//!   `lcm * cost <= UNIFORM_MERGE_CELL_CAP`; indices come from integer division only.
//! - `Disjoint`: one side ends before the other starts; the lists are concatenated and the
//!   gap between them is never reported.
//! - `Identity`: both lists are equal; every triple is `(i, i, i)`.
//! - `General`: a two-pointer interleave that folds breakpoints closer than `EPSILON`.

use std::sync::Arc;

use crate::consts::{EPSILON, UNIFORM_MERGE_CELL_CAP};
use crate::coords::Coords;

/// Which merge strategy a [`GridMerger`] uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergerKind {
    /// Integer-only merge of two uniform subdivisions.
    Uniform,
    /// Concatenation of two non-overlapping lists.
    Disjoint,
    /// Two identical lists.
    Identity,
    /// Interleave of arbitrary lists.
    General,
}

#[derive(Debug)]
enum Strategy<'a> {
    Uniform {
        bits: u8,
        cells: u32,
        left_step: u32,
        right_step: u32,
    },
    Disjoint {
        lower: &'a [f64],
        upper: &'a [f64],
        swapped: bool,
    },
    Identity(&'a Coords),
    General {
        coords: Vec<f64>,
        left: Vec<i32>,
        right: Vec<i32>,
    },
}

/// Merged view over two boundary lists.
#[derive(Debug)]
pub struct GridMerger<'a> {
    strategy: Strategy<'a>,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "Shape grids are far smaller than i32::MAX cells per axis."
)]
#[inline]
fn wide(index: usize) -> i32 {
    index as i32
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Shape grids are far smaller than u32::MAX cells per axis."
)]
#[inline]
fn narrow(index: usize) -> u32 {
    index as u32
}

impl<'a> GridMerger<'a> {
    /// Pick a strategy for merging `left` with `right`.
    ///
    /// `cost` is the number of merged cells already produced on the outer axes; it bounds how
    /// large a uniform merge may grow. `keep_left` / `keep_right` state whether regions covered
    /// by only one side can affect the result; when they cannot, the general strategy drops
    /// breakpoints outside the other side's range.
    pub fn new(
        cost: u64,
        left: &'a Coords,
        right: &'a Coords,
        keep_left: bool,
        keep_right: bool,
    ) -> Self {
        if let (Some(lb), Some(rb)) = (left.uniform_bits(), right.uniform_bits()) {
            let (n, m) = (u64::from(left.cells()), u64::from(right.cells()));
            let cells = lcm(n, m);
            if cost.saturating_mul(cells) <= UNIFORM_MERGE_CELL_CAP {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "cells is at most UNIFORM_MERGE_CELL_CAP."
                )]
                let strategy = Strategy::Uniform {
                    bits: lb.max(rb),
                    cells: cells as u32,
                    left_step: (cells / n) as u32,
                    right_step: (cells / m) as u32,
                };
                return Self { strategy };
            }
        }
        let (l, r) = (left.as_slice(), right.as_slice());
        let strategy = if left.last() < right.first() - EPSILON {
            Strategy::Disjoint {
                lower: l,
                upper: r,
                swapped: false,
            }
        } else if right.last() < left.first() - EPSILON {
            Strategy::Disjoint {
                lower: r,
                upper: l,
                swapped: true,
            }
        } else if l == r {
            Strategy::Identity(left)
        } else {
            tracing::trace!(
                left = l.len(),
                right = r.len(),
                "falling back to general coordinate merge"
            );
            Self::interleave(l, r, keep_left, keep_right)
        };
        Self { strategy }
    }

    fn interleave(l: &[f64], r: &[f64], keep_left: bool, keep_right: bool) -> Strategy<'a> {
        let capacity = l.len() + r.len();
        let mut coords = Vec::with_capacity(capacity);
        let mut left = Vec::with_capacity(capacity);
        let mut right = Vec::with_capacity(capacity);
        let mut last: Option<f64> = None;
        let (mut i, mut j) = (0, 0);
        loop {
            let left_done = i >= l.len();
            let right_done = j >= r.len();
            if left_done && right_done {
                break;
            }
            let take_left = !left_done && (right_done || l[i] < r[j] + EPSILON);
            if take_left {
                i += 1;
                // Outside the right range only left-only cells exist; skip if they are irrelevant.
                if !keep_left && (j == 0 || right_done) {
                    continue;
                }
            } else {
                j += 1;
                if !keep_right && (i == 0 || left_done) {
                    continue;
                }
            }
            let value = if take_left { l[i - 1] } else { r[j - 1] };
            let (li, ri) = (wide(i) - 1, wide(j) - 1);
            match last {
                Some(prev) if prev >= value - EPSILON => {
                    // Zero-width interval: fold into the previous breakpoint.
                    if let (Some(a), Some(b)) = (left.last_mut(), right.last_mut()) {
                        *a = li;
                        *b = ri;
                    }
                }
                _ => {
                    coords.push(value);
                    left.push(li);
                    right.push(ri);
                    last = Some(value);
                }
            }
        }
        if coords.is_empty() {
            coords.push(0.0);
        }
        Strategy::General {
            coords,
            left,
            right,
        }
    }

    /// Which strategy was selected.
    pub fn kind(&self) -> MergerKind {
        match self.strategy {
            Strategy::Uniform { .. } => MergerKind::Uniform,
            Strategy::Disjoint { .. } => MergerKind::Disjoint,
            Strategy::Identity(_) => MergerKind::Identity,
            Strategy::General { .. } => MergerKind::General,
        }
    }

    /// Number of merged boundaries.
    pub fn len(&self) -> usize {
        match &self.strategy {
            Strategy::Uniform { cells, .. } => *cells as usize + 1,
            Strategy::Disjoint { lower, upper, .. } => lower.len() + upper.len(),
            Strategy::Identity(coords) => coords.as_slice().len(),
            Strategy::General { coords, .. } => coords.len(),
        }
    }

    /// True if there are no merged boundaries. Never the case; every strategy keeps at least one.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of merged cells.
    pub fn cells(&self) -> u32 {
        narrow(self.len().saturating_sub(1))
    }

    /// The merged boundary list.
    pub fn coords(&self) -> Coords {
        match &self.strategy {
            Strategy::Uniform { bits, .. } => Coords::Uniform(*bits),
            Strategy::Disjoint { lower, upper, .. } => {
                Coords::Explicit(lower.iter().chain(upper.iter()).copied().collect())
            }
            Strategy::Identity(coords) => (*coords).clone(),
            Strategy::General { coords, .. } => Coords::Explicit(Arc::from(coords.as_slice())),
        }
    }

    /// Visit `(left, right, merged)` for each merged cell in order.
    ///
    /// The visitor returns `false` to stop. Returns `true` if every cell was visited.
    pub fn for_merged_indexes(&self, mut visit: impl FnMut(i32, i32, u32) -> bool) -> bool {
        match &self.strategy {
            Strategy::Uniform {
                cells,
                left_step,
                right_step,
                ..
            } => {
                for i in 0..*cells {
                    #[allow(
                        clippy::cast_possible_wrap,
                        reason = "cells is at most UNIFORM_MERGE_CELL_CAP."
                    )]
                    let (l, r) = ((i / left_step) as i32, (i / right_step) as i32);
                    if !visit(l, r, i) {
                        return false;
                    }
                }
                true
            }
            Strategy::Disjoint {
                lower,
                upper,
                swapped,
            } => {
                let orient = |lo: i32, up: i32| if *swapped { (up, lo) } else { (lo, up) };
                let n = lower.len();
                for i in 0..n - 1 {
                    let (l, r) = orient(wide(i), -1);
                    if !visit(l, r, narrow(i)) {
                        return false;
                    }
                }
                for i in 0..upper.len() - 1 {
                    let (l, r) = orient(-1, wide(i));
                    if !visit(l, r, narrow(n + i)) {
                        return false;
                    }
                }
                true
            }
            Strategy::Identity(coords) => {
                for i in 0..coords.cells() {
                    #[allow(
                        clippy::cast_possible_wrap,
                        reason = "Shape grids are far smaller than i32::MAX cells per axis."
                    )]
                    let w = i as i32;
                    if !visit(w, w, i) {
                        return false;
                    }
                }
                true
            }
            Strategy::General {
                coords,
                left,
                right,
            } => {
                for k in 0..coords.len() - 1 {
                    if !visit(left[k], right[k], narrow(k)) {
                        return false;
                    }
                }
                true
            }
        }
    }
}

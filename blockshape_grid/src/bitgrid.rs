// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense bit-packed occupancy grid.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::axis::Axis;
use crate::grid::OccupancyGrid;

const WORD_BITS: usize = u64::BITS as usize;

/// Dense occupancy grid storing one bit per cell.
///
/// Cell `(x, y, z)` lives at bit `(x * size_y + y) * size_z + z`.
/// Bounds are widened on every [`fill`](Self::fill), so they stay tight.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitGrid {
    size: [u32; 3],
    first: [u32; 3],
    last: [u32; 3],
    words: Vec<u64>,
}

impl BitGrid {
    /// Create an empty grid.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let cells = size_x as usize * size_y as usize * size_z as usize;
        Self {
            size: [size_x, size_y, size_z],
            first: [size_x, size_y, size_z],
            last: [0; 3],
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Create a grid with exactly the box `[min, max)` filled.
    ///
    /// Bounds are set directly rather than widened cell by cell.
    ///
    /// # Panics
    ///
    /// Panics if the box is empty on any axis or does not fit inside the grid.
    pub fn with_filled_bounds(
        size_x: u32,
        size_y: u32,
        size_z: u32,
        min_x: u32,
        min_y: u32,
        min_z: u32,
        max_x: u32,
        max_y: u32,
        max_z: u32,
    ) -> Self {
        assert!(
            min_x < max_x && min_y < max_y && min_z < max_z,
            "filled bounds must be non-empty"
        );
        assert!(
            max_x <= size_x && max_y <= size_y && max_z <= size_z,
            "filled bounds must fit the grid"
        );
        let mut grid = Self::new(size_x, size_y, size_z);
        for x in min_x..max_x {
            for y in min_y..max_y {
                for z in min_z..max_z {
                    grid.set_bit(x, y, z);
                }
            }
        }
        grid.first = [min_x, min_y, min_z];
        grid.last = [max_x, max_y, max_z];
        grid
    }

    /// Copy any occupancy grid into a dense one.
    ///
    /// Dense sources are bit-copied; anything else is scanned cell by cell.
    pub fn from_grid<G: OccupancyGrid + ?Sized>(source: &G) -> Self {
        if let Some(dense) = source.as_bit_grid() {
            return dense.clone();
        }
        let mut grid = Self::new(
            source.size(Axis::X),
            source.size(Axis::Y),
            source.size(Axis::Z),
        );
        if source.is_empty() {
            return grid;
        }
        for x in source.first_full(Axis::X)..source.last_full(Axis::X) {
            for y in source.first_full(Axis::Y)..source.last_full(Axis::Y) {
                for z in source.first_full(Axis::Z)..source.last_full(Axis::Z) {
                    if source.is_full(x, y, z) {
                        grid.fill(x, y, z);
                    }
                }
            }
        }
        grid
    }

    #[inline]
    fn bit_index(&self, x: u32, y: u32, z: u32) -> usize {
        (x as usize * self.size[1] as usize + y as usize) * self.size[2] as usize + z as usize
    }

    #[inline]
    fn in_range(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.size[0] && y < self.size[1] && z < self.size[2]
    }

    #[inline]
    fn get_bit(&self, x: u32, y: u32, z: u32) -> bool {
        let i = self.bit_index(x, y, z);
        self.words[i / WORD_BITS] & (1_u64 << (i % WORD_BITS)) != 0
    }

    #[inline]
    fn set_bit(&mut self, x: u32, y: u32, z: u32) {
        let i = self.bit_index(x, y, z);
        self.words[i / WORD_BITS] |= 1_u64 << (i % WORD_BITS);
    }

    #[inline]
    fn clear_bit(&mut self, x: u32, y: u32, z: u32) {
        let i = self.bit_index(x, y, z);
        self.words[i / WORD_BITS] &= !(1_u64 << (i % WORD_BITS));
    }

    /// Mark a cell full and widen the cached bounds.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    pub fn fill(&mut self, x: u32, y: u32, z: u32) {
        assert!(self.in_range(x, y, z), "cell ({x}, {y}, {z}) outside grid");
        self.set_bit(x, y, z);
        for (i, v) in [x, y, z].into_iter().enumerate() {
            self.first[i] = self.first[i].min(v);
            self.last[i] = self.last[i].max(v + 1);
        }
    }

    /// True if the cell and its six face neighbours are full.
    ///
    /// Cells on the outer shell of the grid are never interior.
    pub fn is_interior(&self, x: u32, y: u32, z: u32) -> bool {
        let [sx, sy, sz] = self.size;
        x > 0
            && y > 0
            && z > 0
            && x + 1 < sx
            && y + 1 < sy
            && z + 1 < sz
            && self.get_bit(x, y, z)
            && self.get_bit(x - 1, y, z)
            && self.get_bit(x + 1, y, z)
            && self.get_bit(x, y - 1, z)
            && self.get_bit(x, y + 1, z)
            && self.get_bit(x, y, z - 1)
            && self.get_bit(x, y, z + 1)
    }

    /// Number of full cells.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if every cell of `z1..z2` at `(x, y)` is full. False if `(x, y)` is outside the grid.
    pub(crate) fn is_z_strip_full(&self, z1: u32, z2: u32, x: u32, y: u32) -> bool {
        x < self.size[0] && y < self.size[1] && (z1..z2).all(|z| self.get_bit(x, y, z))
    }

    /// True if the rectangle `x1..x2 × z1..z2` is full in layer `y`.
    pub(crate) fn is_xz_rect_full(&self, x1: u32, x2: u32, z1: u32, z2: u32, y: u32) -> bool {
        (x1..x2).all(|x| self.is_z_strip_full(z1, z2, x, y))
    }

    /// Clear `z1..z2` at `(x, y)`. Bounds are left untouched; only scratch copies use this.
    pub(crate) fn clear_z_strip(&mut self, z1: u32, z2: u32, x: u32, y: u32) {
        for z in z1..z2 {
            self.clear_bit(x, y, z);
        }
    }
}

impl OccupancyGrid for BitGrid {
    #[inline]
    fn size(&self, axis: Axis) -> u32 {
        self.size[axis.index()]
    }

    #[inline]
    fn is_full(&self, x: u32, y: u32, z: u32) -> bool {
        self.in_range(x, y, z) && self.get_bit(x, y, z)
    }

    #[inline]
    fn first_full(&self, axis: Axis) -> u32 {
        self.first[axis.index()]
    }

    #[inline]
    fn last_full(&self, axis: Axis) -> u32 {
        self.last[axis.index()]
    }

    fn as_bit_grid(&self) -> Option<&BitGrid> {
        Some(self)
    }
}

impl Debug for BitGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitGrid")
            .field("size", &self.size)
            .field("first", &self.first)
            .field("last", &self.last)
            .field("full_cells", &self.count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SubGrid;

    #[test]
    fn new_grid_is_empty_with_canonical_bounds() {
        let g = BitGrid::new(3, 4, 5);
        assert!(g.is_empty());
        assert_eq!(g.first_full(Axis::X), 3);
        assert_eq!(g.first_full(Axis::Z), 5);
        assert_eq!(g.last_full(Axis::Y), 0);
        assert_eq!(g.count(), 0);
    }

    #[test]
    fn fill_widens_bounds() {
        let mut g = BitGrid::new(8, 8, 8);
        g.fill(2, 3, 4);
        assert_eq!(
            [
                g.first_full(Axis::X),
                g.first_full(Axis::Y),
                g.first_full(Axis::Z)
            ],
            [2, 3, 4]
        );
        g.fill(6, 1, 4);
        assert_eq!(g.first_full(Axis::Y), 1);
        assert_eq!(g.last_full(Axis::X), 7);
        assert_eq!(g.last_full(Axis::Z), 5);
        assert!(g.is_full(6, 1, 4));
        assert!(!g.is_full(6, 1, 5));
        assert!(!g.is_full(8, 0, 0));
        assert!(!g.is_empty());
    }

    #[test]
    fn filled_bounds_match_incremental_fill() {
        let a = BitGrid::with_filled_bounds(4, 2, 8, 1, 0, 2, 3, 2, 7);
        let mut b = BitGrid::new(4, 2, 8);
        for x in 1..3 {
            for y in 0..2 {
                for z in 2..7 {
                    b.fill(x, y, z);
                }
            }
        }
        assert_eq!(a, b);
        assert_eq!(a.count(), 2 * 2 * 5);
    }

    #[test]
    #[should_panic(expected = "filled bounds must be non-empty")]
    fn filled_bounds_reject_empty_box() {
        let _ = BitGrid::with_filled_bounds(2, 2, 2, 1, 0, 0, 1, 2, 2);
    }

    #[test]
    #[should_panic(expected = "filled bounds must fit the grid")]
    fn filled_bounds_reject_overflow() {
        let _ = BitGrid::with_filled_bounds(2, 2, 2, 0, 0, 0, 2, 3, 2);
    }

    #[test]
    fn copy_from_sub_grid_recomputes_tight_bounds() {
        let mut g = BitGrid::new(4, 4, 4);
        g.fill(0, 0, 0);
        g.fill(3, 3, 3);
        g.fill(1, 2, 3);
        let copy = BitGrid::from_grid(&SubGrid::slice(&g, Axis::Z, 3));
        assert_eq!(copy.size(Axis::Z), 1);
        assert_eq!(copy.count(), 2);
        assert_eq!(copy.first_full(Axis::X), 1);
        assert_eq!(copy.last_full(Axis::X), 4);
        assert!(copy.is_full(3, 3, 0));
    }

    #[test]
    fn copy_from_dense_is_identical() {
        let g = BitGrid::with_filled_bounds(2, 2, 2, 0, 0, 0, 1, 2, 2);
        assert_eq!(BitGrid::from_grid(&g), g);
    }

    #[test]
    fn interior_requires_full_neighbourhood() {
        let g = BitGrid::with_filled_bounds(3, 3, 3, 0, 0, 0, 3, 3, 3);
        assert!(g.is_interior(1, 1, 1));
        assert!(!g.is_interior(0, 1, 1));
        let mut h = BitGrid::new(3, 3, 3);
        h.fill(1, 1, 1);
        for (x, y, z) in [(0, 1, 1), (2, 1, 1), (1, 0, 1), (1, 2, 1), (1, 1, 0)] {
            h.fill(x, y, z);
        }
        assert!(!h.is_interior(1, 1, 1));
        h.fill(1, 1, 2);
        assert!(h.is_interior(1, 1, 1));
    }

    #[test]
    fn signed_access_treats_outside_as_empty() {
        let g = BitGrid::with_filled_bounds(1, 1, 1, 0, 0, 0, 1, 1, 1);
        assert!(g.is_full_wide(0, 0, 0));
        assert!(!g.is_full_wide(-1, 0, 0));
        assert!(!g.is_full_wide(0, 1, 0));
    }
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The occupancy grid capability trait and a windowed view over another grid.

use core::fmt::Debug;
use core::ops::Range;

use crate::axis::Axis;
use crate::bitgrid::BitGrid;

/// A fixed-size 3D boolean grid with cached tight bounds.
///
/// Implementations guarantee that every full cell lies inside
/// `first_full(axis)..last_full(axis)` on each axis and that those ranges are minimal.
/// An empty grid reports `first_full == size` and `last_full == 0` on every axis.
pub trait OccupancyGrid: Debug {
    /// Number of cells along `axis`.
    fn size(&self, axis: Axis) -> u32;

    /// Whether the cell is full. Cells outside the grid are empty.
    fn is_full(&self, x: u32, y: u32, z: u32) -> bool;

    /// Lowest full index along `axis` (inclusive).
    fn first_full(&self, axis: Axis) -> u32;

    /// One past the highest full index along `axis` (exclusive).
    fn last_full(&self, axis: Axis) -> u32;

    /// True if no cell is full.
    fn is_empty(&self) -> bool {
        Axis::ALL
            .iter()
            .any(|&a| self.first_full(a) >= self.last_full(a))
    }

    /// Like [`is_full`](Self::is_full), but accepts signed indices; anything out of range is empty.
    #[inline]
    fn is_full_wide(&self, x: i32, y: i32, z: i32) -> bool {
        match (u32::try_from(x), u32::try_from(y), u32::try_from(z)) {
            (Ok(x), Ok(y), Ok(z)) => self.is_full(x, y, z),
            _ => false,
        }
    }

    /// Downcast hook used by [`BitGrid::from_grid`] to bit-copy dense sources.
    fn as_bit_grid(&self) -> Option<&BitGrid> {
        None
    }
}

/// Read-only window onto part of another grid.
///
/// Indices are relative to the window's start. Bounds are computed when the view is created.
#[derive(Debug)]
pub struct SubGrid<'a, G: OccupancyGrid + ?Sized> {
    parent: &'a G,
    start: [u32; 3],
    end: [u32; 3],
    first: [u32; 3],
    last: [u32; 3],
}

impl<'a, G: OccupancyGrid + ?Sized> SubGrid<'a, G> {
    /// Create a window covering `ranges` (one per axis, `X, Y, Z`) of `parent`.
    ///
    /// Ranges are clamped to the parent's size.
    pub fn new(parent: &'a G, ranges: [Range<u32>; 3]) -> Self {
        let mut start = [0; 3];
        let mut end = [0; 3];
        for axis in Axis::ALL {
            let i = axis.index();
            let size = parent.size(axis);
            end[i] = ranges[i].end.min(size);
            start[i] = ranges[i].start.min(end[i]);
        }
        let mut sub = Self {
            parent,
            start,
            end,
            first: [0; 3],
            last: [0; 3],
        };
        sub.first = [sub.size(Axis::X), sub.size(Axis::Y), sub.size(Axis::Z)];
        // Windows are face-sized in practice, so an exact scan is cheap.
        for x in 0..sub.size(Axis::X) {
            for y in 0..sub.size(Axis::Y) {
                for z in 0..sub.size(Axis::Z) {
                    if sub.is_full(x, y, z) {
                        for (i, v) in [x, y, z].into_iter().enumerate() {
                            sub.first[i] = sub.first[i].min(v);
                            sub.last[i] = sub.last[i].max(v + 1);
                        }
                    }
                }
            }
        }
        sub
    }

    /// A window of thickness one at `index` along `axis`, spanning the other two axes.
    pub fn slice(parent: &'a G, axis: Axis, index: u32) -> Self {
        let ranges = Axis::ALL.map(|a| {
            if a == axis {
                index..index.saturating_add(1)
            } else {
                0..parent.size(a)
            }
        });
        Self::new(parent, ranges)
    }
}

impl<G: OccupancyGrid + ?Sized> OccupancyGrid for SubGrid<'_, G> {
    fn size(&self, axis: Axis) -> u32 {
        let i = axis.index();
        self.end[i] - self.start[i]
    }

    fn is_full(&self, x: u32, y: u32, z: u32) -> bool {
        x < self.size(Axis::X)
            && y < self.size(Axis::Y)
            && z < self.size(Axis::Z)
            && self
                .parent
                .is_full(x + self.start[0], y + self.start[1], z + self.start[2])
    }

    fn first_full(&self, axis: Axis) -> u32 {
        self.first[axis.index()]
    }

    fn last_full(&self, axis: Axis) -> u32 {
        self.last[axis.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_reports_tight_bounds() {
        let mut g = BitGrid::new(4, 4, 4);
        g.fill(1, 2, 3);
        g.fill(2, 0, 3);
        g.fill(0, 0, 0);
        let s = SubGrid::slice(&g, Axis::Z, 3);
        assert_eq!(s.size(Axis::Z), 1);
        assert_eq!(s.size(Axis::X), 4);
        assert!(s.is_full(1, 2, 0));
        assert!(!s.is_full(0, 0, 0));
        assert_eq!(s.first_full(Axis::X), 1);
        assert_eq!(s.last_full(Axis::X), 3);
        assert_eq!(s.first_full(Axis::Y), 0);
        assert_eq!(s.last_full(Axis::Y), 3);
    }

    #[test]
    fn out_of_range_window_is_empty() {
        let mut g = BitGrid::new(2, 2, 2);
        g.fill(0, 0, 0);
        let s = SubGrid::slice(&g, Axis::X, 5);
        assert_eq!(s.size(Axis::X), 0);
        assert!(s.is_empty());
        assert!(!s.is_full_wide(-1, 0, 0));
    }
}

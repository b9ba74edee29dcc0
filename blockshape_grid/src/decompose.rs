// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decomposition of an occupancy grid into axis-aligned cell boxes.
//!
//! The coalescing pass is a greedy scanline:
//! a maximal run along `z` is grown along `+x` while the same run stays full,
//! then the resulting `x × z` rectangle is grown along `+y`.
//! Consumed cells are cleared from a private copy, so every full cell is emitted exactly once.

use alloc::vec::Vec;

use crate::axis::Axis;
use crate::bitgrid::BitGrid;
use crate::grid::OccupancyGrid;

/// A box of grid cells, `min` inclusive and `max` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellBox {
    /// Minimum x cell.
    pub min_x: u32,
    /// Minimum y cell.
    pub min_y: u32,
    /// Minimum z cell.
    pub min_z: u32,
    /// One past the maximum x cell.
    pub max_x: u32,
    /// One past the maximum y cell.
    pub max_y: u32,
    /// One past the maximum z cell.
    pub max_z: u32,
}

impl CellBox {
    /// Create a new cell box from min/max corners.
    pub const fn new(
        min_x: u32,
        min_y: u32,
        min_z: u32,
        max_x: u32,
        max_y: u32,
        max_z: u32,
    ) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Inclusive lower corner on `axis`.
    pub fn min(&self, axis: Axis) -> u32 {
        axis.choose(self.min_x, self.min_y, self.min_z)
    }

    /// Exclusive upper corner on `axis`.
    pub fn max(&self, axis: Axis) -> u32 {
        axis.choose(self.max_x, self.max_y, self.max_z)
    }

    /// Number of cells covered.
    pub fn volume(&self) -> u64 {
        u64::from(self.max_x - self.min_x)
            * u64::from(self.max_y - self.min_y)
            * u64::from(self.max_z - self.min_z)
    }
}

/// Visit boxes whose union is exactly the full cells of `grid`.
///
/// With `coalesce` set, neighbouring cells are merged greedily into larger boxes.
/// Otherwise every full cell is reported as its own unit box.
pub fn for_all_boxes<G: OccupancyGrid + ?Sized>(
    grid: &G,
    coalesce: bool,
    mut visit: impl FnMut(CellBox),
) {
    if grid.is_empty() {
        return;
    }
    let mut scratch = BitGrid::from_grid(grid);
    let size_x = grid.size(Axis::X);
    let size_z = grid.size(Axis::Z);
    for y in grid.first_full(Axis::Y)..grid.last_full(Axis::Y) {
        for x in 0..size_x {
            let mut run_start: Option<u32> = None;
            for z in 0..=size_z {
                if scratch.is_full(x, y, z) {
                    if !coalesce {
                        visit(CellBox::new(x, y, z, x + 1, y + 1, z + 1));
                    } else if run_start.is_none() {
                        run_start = Some(z);
                    }
                    continue;
                }
                let Some(z1) = run_start.take() else {
                    continue;
                };
                let mut end_x = x;
                let mut end_y = y;
                scratch.clear_z_strip(z1, z, x, y);
                while scratch.is_z_strip_full(z1, z, end_x + 1, y) {
                    scratch.clear_z_strip(z1, z, end_x + 1, y);
                    end_x += 1;
                }
                while scratch.is_xz_rect_full(x, end_x + 1, z1, z, end_y + 1) {
                    for cx in x..=end_x {
                        scratch.clear_z_strip(z1, z, cx, end_y + 1);
                    }
                    end_y += 1;
                }
                visit(CellBox::new(x, y, z1, end_x + 1, end_y + 1, z));
            }
        }
    }
}

/// Collect [`for_all_boxes`] output into a vector.
pub fn to_boxes<G: OccupancyGrid + ?Sized>(grid: &G, coalesce: bool) -> Vec<CellBox> {
    let mut out = Vec::new();
    for_all_boxes(grid, coalesce, |b| out.push(b));
    out
}

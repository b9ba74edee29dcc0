// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blockshape Grid: integer-indexed 3D occupancy grids.
//!
//! This is the leaf layer of the blockshape solid engine.
//!
//! - [`OccupancyGrid`] is the capability trait: per-cell occupancy plus cached tight bounds.
//! - [`BitGrid`] is the dense, bit-packed implementation used for every materialized shape.
//! - [`SubGrid`] is a borrowed window onto another grid (used to cut face slices).
//! - [`for_all_boxes`] decomposes a grid into axis-aligned [`CellBox`]es, optionally
//!   coalescing neighbouring cells greedily.
//!
//! Grids know nothing about real coordinates; the `blockshape_shape` crate pairs them with
//! per-axis boundary lists.
//!
//! # Example
//!
//! ```rust
//! use blockshape_grid::{Axis, BitGrid, OccupancyGrid, to_boxes};
//!
//! // A 2×2×2 grid with its bottom layer filled.
//! let grid = BitGrid::with_filled_bounds(2, 2, 2, 0, 0, 0, 2, 1, 2);
//! assert_eq!(grid.last_full(Axis::Y), 1);
//! assert_eq!(grid.count(), 4);
//!
//! // The layer coalesces into a single box.
//! let boxes = to_boxes(&grid, true);
//! assert_eq!(boxes.len(), 1);
//! assert_eq!(boxes[0].volume(), 4);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod bitgrid;
pub mod decompose;
pub mod grid;

pub use axis::Axis;
pub use bitgrid::BitGrid;
pub use decompose::{CellBox, for_all_boxes, to_boxes};
pub use grid::{OccupancyGrid, SubGrid};

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerances and tuning constants shared by every shape operation.

/// Coordinates closer than this are treated as equal.
pub const EPSILON: f64 = 1.0e-7;

/// Finest power-of-two subdivision a box snaps to (`2^3 = 8` cells per unit).
pub const MAX_RESOLUTION_BITS: u8 = 3;

/// Upper bound on `lcm(left_cells, right_cells) * cost` for integer-only uniform merges.
pub const UNIFORM_MERGE_CELL_CAP: u64 = 256;

/// Fraction of a ray's length probed to detect rays that start inside a shape.
pub const RAY_PROBE_FRACTION: f64 = 0.001;

/// Boundary tables of the uniform subdivisions of `[0, 1]`, indexed by bit depth.
pub const UNIFORM_COORDS: [&[f64]; MAX_RESOLUTION_BITS as usize + 1] = [
    &[0.0, 1.0],
    &[0.0, 0.5, 1.0],
    &[0.0, 0.25, 0.5, 0.75, 1.0],
    &[0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0],
];

/// True if `a` and `b` are within [`EPSILON`] of each other.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported when validating caller-supplied geometry.

use blockshape_grid::Axis;

/// Invalid box bounds passed to [`cuboid`](crate::cuboid).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// The minimum exceeds the maximum on an axis.
    #[error("min {min} exceeds max {max} on the {axis:?} axis")]
    InvertedBounds {
        /// Offending axis.
        axis: Axis,
        /// Supplied minimum.
        min: f64,
        /// Supplied maximum.
        max: f64,
    },
    /// A bound is NaN or infinite.
    #[error("non-finite bound on the {axis:?} axis")]
    NonFinite {
        /// Offending axis.
        axis: Axis,
    },
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Face occlusion between neighbouring blocks.
//!
//! These answer "is the face between two adjacent blocks hidden?" for lighting and rendering
//! consumers. All of them work on the face layers returned by [`Shape::face_shape`].

use blockshape_grid::Axis;

use crate::algebra::{block, empty, join_is_not_empty, join_unoptimized};
use crate::consts::{EPSILON, approx_eq};
use crate::direction::{AxisDirection, Direction};
use crate::op::BooleanOp;
use crate::shape::Shape;

/// True if the `direction` face of `first` is hidden by `second`, its neighbour in `direction`.
///
/// Both shapes must touch the shared face, and every part of `first`'s face layer must be
/// covered by `second`'s.
pub fn block_occludes(first: &Shape, second: &Shape, direction: Direction) -> bool {
    if first.is_block() && second.is_block() {
        return true;
    }
    if second.is_empty() {
        return false;
    }
    let axis = direction.axis();
    let (lower, upper) = match direction.axis_direction() {
        AxisDirection::Positive => (first, second),
        AxisDirection::Negative => (second, first),
    };
    if !approx_eq(lower.max(axis), 1.0) || !approx_eq(upper.min(axis), 0.0) {
        return false;
    }
    !join_is_not_empty(
        &first.face_shape(direction),
        &second.face_shape(direction.opposite()),
        BooleanOp::ONLY_FIRST,
    )
}

/// True if the faces `first` and `second` show each other across `direction` together cover
/// the whole face.
pub fn merged_face_occludes(first: &Shape, second: &Shape, direction: Direction) -> bool {
    if first.is_block() || second.is_block() {
        return true;
    }
    let axis = direction.axis();
    let (lower, upper) = match direction.axis_direction() {
        AxisDirection::Positive => (first, second),
        AxisDirection::Negative => (second, first),
    };
    let lower_face = if approx_eq(lower.max(axis), 1.0) {
        lower.face_shape(Direction::from_axis(axis, AxisDirection::Positive))
    } else {
        empty()
    };
    let upper_face = if approx_eq(upper.min(axis), 0.0) {
        upper.face_shape(Direction::from_axis(axis, AxisDirection::Negative))
    } else {
        empty()
    };
    face_shape_occludes(&lower_face, &upper_face)
}

/// True if the union of two face layers covers the whole unit square.
pub fn face_shape_occludes(first: &Shape, second: &Shape) -> bool {
    if first.is_block() || second.is_block() {
        return true;
    }
    if first.is_empty() && second.is_empty() {
        return false;
    }
    if first.covers_block() || second.covers_block() {
        return true;
    }
    if !merged_may_occlude_block(first, second) {
        return false;
    }
    !join_is_not_empty(
        &block(),
        &join_unoptimized(first, second, BooleanOp::OR),
        BooleanOp::ONLY_FIRST,
    )
}

/// False if the union of the two shapes' bounds misses part of `[0, 1]` on some axis.
///
/// A `true` result only means the exact union test is needed.
pub fn merged_may_occlude_block(first: &Shape, second: &Shape) -> bool {
    if first.is_empty() && second.is_empty() {
        return false;
    }
    Axis::ALL.iter().all(|&axis| {
        first.min(axis).min(second.min(axis)) <= EPSILON
            && first.max(axis).max(second.max(axis)) >= 1.0 - EPSILON
    })
}

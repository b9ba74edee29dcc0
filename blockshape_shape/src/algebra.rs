// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction and boolean combination of shapes.

use blockshape_grid::{Axis, BitGrid, OccupancyGrid};

use crate::consts::{EPSILON, MAX_RESOLUTION_BITS};
use crate::coords::Coords;
use crate::error::ShapeError;
use crate::merge::GridMerger;
use crate::op::BooleanOp;
use crate::shape::{BLOCK, EMPTY, Shape};
use crate::types::Aabb;

/// The shape with no full cells.
pub fn empty() -> Shape {
    EMPTY.clone()
}

/// The full unit cube.
pub fn block() -> Shape {
    BLOCK.clone()
}

/// Smallest power-of-two subdivision of `[0, 1]` on which both `min` and `max` lie.
///
/// Returns `None` if the interval leaves `[0, 1]` or needs more than
/// [`MAX_RESOLUTION_BITS`] bits.
pub fn find_bits(min: f64, max: f64) -> Option<u8> {
    if min < -EPSILON || max > 1.0 + EPSILON {
        return None;
    }
    (0..=MAX_RESOLUTION_BITS).find(|&bits| {
        let scale = f64::from(1_u32 << bits);
        let (lo, hi) = (min * scale, max * scale);
        (lo - lo.round()).abs() < EPSILON * scale && (hi - hi.round()).abs() < EPSILON * scale
    })
}

/// A box shape, validated.
///
/// Boxes thinner than [`EPSILON`] on any axis are [`empty`].
///
/// # Errors
///
/// Returns [`ShapeError::NonFinite`] for NaN or infinite bounds and
/// [`ShapeError::InvertedBounds`] when a minimum exceeds its maximum.
pub fn cuboid(min: [f64; 3], max: [f64; 3]) -> Result<Shape, ShapeError> {
    for axis in Axis::ALL {
        let (lo, hi) = (min[axis.index()], max[axis.index()]);
        if !lo.is_finite() || !hi.is_finite() {
            return Err(ShapeError::NonFinite { axis });
        }
        if lo > hi {
            return Err(ShapeError::InvertedBounds {
                axis,
                min: lo,
                max: hi,
            });
        }
    }
    Ok(create(min[0], min[1], min[2], max[0], max[1], max[2]))
}

/// A box shape from an [`Aabb`].
pub fn from_aabb(aabb: &Aabb) -> Shape {
    create(
        aabb.min_x,
        aabb.min_y,
        aabb.min_z,
        aabb.max_x,
        aabb.max_y,
        aabb.max_z,
    )
}

/// A box shape, snapped onto the coarsest uniform grid that represents it exactly.
///
/// Boxes that do not align to eighths of the unit cube, or reach outside it, get a single
/// cell with explicit boundaries instead.
pub fn create(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Shape {
    if max_x - min_x < EPSILON || max_y - min_y < EPSILON || max_z - min_z < EPSILON {
        return empty();
    }
    let bits = [
        find_bits(min_x, max_x),
        find_bits(min_y, max_y),
        find_bits(min_z, max_z),
    ];
    let [Some(bx), Some(by), Some(bz)] = bits else {
        tracing::trace!(
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
            "box is not grid aligned; using explicit boundaries"
        );
        return Shape::with_coords(
            BitGrid::with_filled_bounds(1, 1, 1, 0, 0, 0, 1, 1, 1),
            [
                Coords::explicit(vec![min_x, max_x]),
                Coords::explicit(vec![min_y, max_y]),
                Coords::explicit(vec![min_z, max_z]),
            ],
        );
    };
    if bx == 0 && by == 0 && bz == 0 {
        return block();
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Snapped values are rounded into 0..=8."
    )]
    let snap = |v: f64, bits: u8| (v * f64::from(1_u32 << bits)).round().max(0.0) as u32;
    let (x0, y0, z0) = (snap(min_x, bx), snap(min_y, by), snap(min_z, bz));
    let (x1, y1, z1) = (snap(max_x, bx), snap(max_y, by), snap(max_z, bz));
    if x0 >= x1 || y0 >= y1 || z0 >= z1 {
        return empty();
    }
    let grid = BitGrid::with_filled_bounds(
        1 << bx,
        1 << by,
        1 << bz,
        x0,
        y0,
        z0,
        x1,
        y1,
        z1,
    );
    Shape::with_coords(grid, [bx, by, bz].map(Coords::Uniform))
}

fn mergers<'a>(
    first: &'a Shape,
    second: &'a Shape,
    op: BooleanOp,
) -> [GridMerger<'a>; 3] {
    let (keep_first, keep_second) = (op.apply(true, false), op.apply(false, true));
    let merger = |axis: Axis, cost: u64| {
        GridMerger::new(
            cost,
            first.coord_list(axis),
            second.coord_list(axis),
            keep_first,
            keep_second,
        )
    };
    let mx = merger(Axis::X, 1);
    let my = merger(Axis::Y, u64::from(mx.cells()));
    let mz = merger(Axis::Z, u64::from(mx.cells()) * u64::from(my.cells()));
    [mx, my, mz]
}

/// Combine two shapes cell by cell, without re-coalescing the result.
///
/// The result keeps every boundary of both operands that the merge did not drop.
///
/// # Panics
///
/// Panics if `op` is true for two empty inputs; such a result would be unbounded.
pub fn join_unoptimized(first: &Shape, second: &Shape, op: BooleanOp) -> Shape {
    assert!(op.is_bounded(), "{op:?} is unbounded and cannot be joined");
    if first.ptr_eq(second) {
        return if op.apply(true, true) {
            first.clone()
        } else {
            empty()
        };
    }
    let (keep_first, keep_second) = (op.apply(true, false), op.apply(false, true));
    if first.is_empty() {
        return if keep_second { second.clone() } else { empty() };
    }
    if second.is_empty() {
        return if keep_first { first.clone() } else { empty() };
    }
    let [mx, my, mz] = mergers(first, second, op);
    let (a, b) = (first.grid(), second.grid());
    let mut grid = BitGrid::new(mx.cells(), my.cells(), mz.cells());
    mx.for_merged_indexes(|x1, x2, x| {
        my.for_merged_indexes(|y1, y2, y| {
            mz.for_merged_indexes(|z1, z2, z| {
                if op.apply(a.is_full_wide(x1, y1, z1), b.is_full_wide(x2, y2, z2)) {
                    grid.fill(x, y, z);
                }
                true
            })
        })
    });
    let shape = Shape::with_coords(grid, [mx.coords(), my.coords(), mz.coords()]);
    if !shape.is_uniform() {
        tracing::debug!(
            ?op,
            kinds = ?[mx.kind(), my.kind(), mz.kind()],
            "join produced a non-uniform shape"
        );
    }
    shape
}

/// Combine two shapes cell by cell and re-coalesce the result.
///
/// # Panics
///
/// Panics if `op` is unbounded, see [`join_unoptimized`].
pub fn join(first: &Shape, second: &Shape, op: BooleanOp) -> Shape {
    join_unoptimized(first, second, op).optimize()
}

/// True if [`join`] would produce a non-empty shape, without building it.
///
/// # Panics
///
/// Panics if `op` is unbounded, see [`join_unoptimized`].
pub fn join_is_not_empty(first: &Shape, second: &Shape, op: BooleanOp) -> bool {
    assert!(op.is_bounded(), "{op:?} is unbounded and cannot be joined");
    let (first_empty, second_empty) = (first.is_empty(), second.is_empty());
    if first_empty || second_empty {
        return op.apply(!first_empty, !second_empty);
    }
    if first.ptr_eq(second) {
        return op.apply(true, true);
    }
    let (keep_first, keep_second) = (op.apply(true, false), op.apply(false, true));
    for axis in Axis::ALL {
        if first.max(axis) < second.min(axis) - EPSILON
            || second.max(axis) < first.min(axis) - EPSILON
        {
            return keep_first || keep_second;
        }
    }
    any_merged_cell(first, second, op, |a, b| op.apply(a, b))
}

/// Walk the merged cells of `first` and `second` until `hit` accepts a cell's occupancy.
fn any_merged_cell(
    first: &Shape,
    second: &Shape,
    op: BooleanOp,
    mut hit: impl FnMut(bool, bool) -> bool,
) -> bool {
    let [mx, my, mz] = mergers(first, second, op);
    let (a, b) = (first.grid(), second.grid());
    !mx.for_merged_indexes(|x1, x2, _| {
        my.for_merged_indexes(|y1, y2, _| {
            mz.for_merged_indexes(|z1, z2, _| {
                !hit(a.is_full_wide(x1, y1, z1), b.is_full_wide(x2, y2, z2))
            })
        })
    })
}

/// Union of two shapes.
pub fn or(first: &Shape, second: &Shape) -> Shape {
    join(first, second, BooleanOp::OR)
}

/// Union of `first` and every shape in `others`.
///
/// Shapes are unioned pairwise in rounds, halving the working set each time, and the
/// result is coalesced once at the end.
pub fn or_all<'a>(first: &Shape, others: impl IntoIterator<Item = &'a Shape>) -> Shape {
    let mut layer: Vec<Shape> = core::iter::once(first.clone())
        .chain(others.into_iter().cloned())
        .collect();
    if layer.len() == 1 {
        return first.clone();
    }
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => join_unoptimized(a, b, BooleanOp::OR),
                _ => pair[0].clone(),
            })
            .collect();
    }
    layer.pop().map_or_else(empty, |s| s.optimize())
}

/// Clamp a movement of `aabb` by `max_distance` along `axis` against every shape in turn.
///
/// Returns `0.0` as soon as the remaining distance drops below [`EPSILON`].
pub fn collide<'a>(
    axis: Axis,
    aabb: &Aabb,
    shapes: impl IntoIterator<Item = &'a Shape>,
    max_distance: f64,
) -> f64 {
    let mut distance = max_distance;
    for shape in shapes {
        if distance.abs() < EPSILON {
            return 0.0;
        }
        distance = shape.collide(axis, aabb, distance);
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_walk_stops_at_first_hit() {
        let corner = create(0.0, 0.0, 0.0, 0.5, 0.5, 0.5);
        let mut calls = 0;
        let found = any_merged_cell(&block(), &corner, BooleanOp::AND, |a, b| {
            calls += 1;
            BooleanOp::AND.apply(a, b)
        });
        assert!(found);
        assert_eq!(calls, 1);

        calls = 0;
        let found = any_merged_cell(&block(), &corner, BooleanOp::ONLY_SECOND, |a, b| {
            calls += 1;
            BooleanOp::ONLY_SECOND.apply(a, b)
        });
        assert!(!found);
        assert!(calls > 1);
    }

    fn boxes(s: &Shape) -> Vec<Aabb> {
        s.to_aabbs()
    }

    #[test]
    fn find_bits_picks_coarsest_grid() {
        assert_eq!(find_bits(0.0, 1.0), Some(0));
        assert_eq!(find_bits(0.0, 0.5), Some(1));
        assert_eq!(find_bits(0.25, 0.5), Some(2));
        assert_eq!(find_bits(0.125, 1.0), Some(3));
        assert_eq!(find_bits(0.1, 1.0), None);
        assert_eq!(find_bits(-0.5, 0.5), None);
        assert_eq!(find_bits(0.0, 1.5), None);
        assert_eq!(find_bits(0.0, 1.0 + EPSILON / 2.0), Some(0));
    }

    #[test]
    fn create_snaps_or_falls_back() {
        assert!(create(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).is_block());
        assert!(create(0.0, 0.0, 0.0, 1.0, 0.0, 1.0).is_empty());

        let slab = create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
        assert!(slab.is_uniform());
        assert_eq!(slab.grid().size(Axis::Y), 2);

        let odd = create(0.1, 0.0, 0.0, 0.9, 1.0, 1.0);
        assert!(!odd.is_uniform());
        assert_eq!(odd.coords(Axis::X), &[0.1, 0.9]);
        assert_eq!(odd.coords(Axis::Y), &[0.0, 1.0]);
        assert_eq!(boxes(&odd), [Aabb::new(0.1, 0.0, 0.0, 0.9, 1.0, 1.0)]);
    }

    #[test]
    fn cuboid_validates_input() {
        assert!(cuboid([0.0; 3], [1.0; 3]).unwrap().is_block());
        assert_eq!(
            cuboid([0.0, 0.6, 0.0], [1.0, 0.5, 1.0]).unwrap_err(),
            ShapeError::InvertedBounds {
                axis: Axis::Y,
                min: 0.6,
                max: 0.5
            }
        );
        assert_eq!(
            cuboid([0.0, 0.0, f64::NAN], [1.0; 3]).unwrap_err(),
            ShapeError::NonFinite { axis: Axis::Z }
        );
    }

    #[test]
    fn halves_union_to_a_block() {
        let west = create(0.0, 0.0, 0.0, 0.5, 1.0, 1.0);
        let east = create(0.5, 0.0, 0.0, 1.0, 1.0, 1.0);
        let joined = or(&west, &east);
        assert!(joined.is_block());
        assert_eq!(boxes(&joined), [Aabb::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)]);
    }

    #[test]
    fn intersection_keeps_the_inner_box() {
        let inner = create(0.25, 0.25, 0.25, 0.75, 0.75, 0.75);
        let joined = join(&block(), &inner, BooleanOp::AND);
        let expected = Aabb::new(0.25, 0.25, 0.25, 0.75, 0.75, 0.75);
        assert_eq!(boxes(&joined), [expected]);
    }

    #[test]
    fn difference_of_unaligned_boxes() {
        let a = create(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let b = create(0.3, -1.0, -1.0, 2.0, 2.0, 2.0);
        let d = join(&a, &b, BooleanOp::ONLY_FIRST);
        assert_eq!(boxes(&d), [Aabb::new(0.0, 0.0, 0.0, 0.3, 1.0, 1.0)]);
        assert!(join_is_not_empty(&a, &b, BooleanOp::ONLY_FIRST));
        let inside = create(0.5, 0.5, 0.5, 0.75, 0.75, 0.75);
        assert!(!join_is_not_empty(&inside, &b, BooleanOp::ONLY_FIRST));
        assert!(join_is_not_empty(&inside, &b, BooleanOp::AND));
    }

    #[test]
    fn fast_paths() {
        let slab = create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
        assert!(join_unoptimized(&slab, &slab, BooleanOp::OR).ptr_eq(&slab));
        assert!(join_unoptimized(&slab, &slab, BooleanOp::NOT_SAME).is_empty());
        assert!(join_unoptimized(&empty(), &slab, BooleanOp::OR).ptr_eq(&slab));
        assert!(join_unoptimized(&slab, &empty(), BooleanOp::ONLY_SECOND).is_empty());
        assert!(!join_is_not_empty(&empty(), &empty(), BooleanOp::OR));
        assert!(join_is_not_empty(&slab, &empty(), BooleanOp::FIRST));
    }

    #[test]
    fn disjoint_bounds_short_circuit() {
        let low = create(0.0, 0.0, 0.0, 1.0, 0.25, 1.0);
        let high = create(0.0, 0.75, 0.0, 1.0, 1.0, 1.0);
        assert!(!join_is_not_empty(&low, &high, BooleanOp::AND));
        assert!(join_is_not_empty(&low, &high, BooleanOp::ONLY_SECOND));
        let both = join(&low, &high, BooleanOp::OR);
        assert_eq!(both.to_aabbs().len(), 2);
    }

    #[test]
    #[should_panic(expected = "unbounded")]
    fn unbounded_ops_are_rejected() {
        let _ = join(&block(), &empty(), BooleanOp::NOT_OR);
    }

    #[test]
    fn or_all_reduces_in_rounds() {
        let quarters: Vec<Shape> = (0..4_u8)
            .map(|i| {
                let lo = f64::from(i) * 0.25;
                create(lo, 0.0, 0.0, lo + 0.25, 1.0, 1.0)
            })
            .collect();
        let all = or_all(&quarters[0], &quarters[1..]);
        assert!(all.is_block());
        let single = or_all(&quarters[2], []);
        assert!(single.ptr_eq(&quarters[2]));
    }

    #[test]
    fn collide_walks_all_shapes() {
        let floor = create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
        let step = create(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).translated(0.0, -1.0, 0.0);
        let falling = Aabb::new(0.2, 2.0, 0.2, 0.8, 3.0, 0.8);
        let d = collide(Axis::Y, &falling, [&step, &floor], -10.0);
        assert!((d + 1.5).abs() < 1e-12);
        assert_eq!(collide(Axis::Y, &falling, [&floor], 0.0), 0.0);
        assert_eq!(collide(Axis::Y, &falling, [], -3.0), -3.0);
    }
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shape value: an occupancy grid paired with per-axis boundary lists.

use std::sync::{Arc, LazyLock, OnceLock};

use blockshape_grid::axis::unrotate;
use blockshape_grid::{Axis, BitGrid, OccupancyGrid, SubGrid};
use kurbo::Rect;

use crate::algebra::{self, join_is_not_empty, join_unoptimized};
use crate::consts::{EPSILON, RAY_PROBE_FRACTION, approx_eq};
use crate::coords::Coords;
use crate::direction::{AxisDirection, Direction, Faces};
use crate::op::BooleanOp;
use crate::types::{Aabb, RayHit};

pub(crate) static EMPTY: LazyLock<Shape> = LazyLock::new(|| {
    Shape::with_coords(
        BitGrid::new(0, 0, 0),
        core::array::from_fn(|_| Coords::explicit(vec![0.0])),
    )
});

pub(crate) static BLOCK: LazyLock<Shape> = LazyLock::new(|| {
    Shape::with_coords(
        BitGrid::with_filled_bounds(1, 1, 1, 0, 0, 0, 1, 1, 1),
        core::array::from_fn(|_| Coords::Uniform(0)),
    )
});

/// An immutable solid made of axis-aligned cells.
///
/// Cloning is cheap: the grid, the boundary lists, and the lazily computed caches are shared.
#[derive(Clone)]
pub struct Shape(Arc<Inner>);

struct Inner {
    grid: BitGrid,
    coords: [Coords; 3],
    // `None` stands for the shape itself, so a shape never holds a reference to itself.
    faces: [OnceLock<Option<Shape>>; 6],
    full_faces: OnceLock<Faces>,
    covers_block: OnceLock<bool>,
}

impl Shape {
    pub(crate) fn with_coords(grid: BitGrid, coords: [Coords; 3]) -> Self {
        debug_assert!(
            Axis::ALL
                .iter()
                .all(|&a| coords[a.index()].cells() == grid.size(a)),
            "boundary lists must have one more entry than the grid has cells"
        );
        Self(Arc::new(Inner {
            grid,
            coords,
            faces: [const { OnceLock::new() }; 6],
            full_faces: OnceLock::new(),
            covers_block: OnceLock::new(),
        }))
    }

    /// Build a shape from a grid and explicit boundaries (`x`, `y`, `z`).
    ///
    /// # Panics
    ///
    /// Panics if a boundary list is not strictly increasing or its length is not the grid size
    /// plus one.
    pub fn from_parts(grid: BitGrid, coords: [Vec<f64>; 3]) -> Self {
        let coords = coords.map(Coords::explicit);
        for axis in Axis::ALL {
            assert_eq!(
                coords[axis.index()].cells(),
                grid.size(axis),
                "{axis:?} boundaries do not match the grid size"
            );
        }
        Self::with_coords(grid, coords)
    }

    /// The occupancy grid.
    pub fn grid(&self) -> &BitGrid {
        &self.0.grid
    }

    /// Boundaries along `axis`.
    pub fn coords(&self, axis: Axis) -> &[f64] {
        self.0.coords[axis.index()].as_slice()
    }

    /// Boundary list along `axis`, uniform or explicit.
    pub fn coord_list(&self, axis: Axis) -> &Coords {
        &self.0.coords[axis.index()]
    }

    /// True if no cell is full.
    pub fn is_empty(&self) -> bool {
        self.0.grid.is_empty()
    }

    /// True if this is the [`block`](crate::block) singleton.
    pub fn is_block(&self) -> bool {
        self.ptr_eq(&BLOCK)
    }

    /// True if both handles share the same interior.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// True if every axis is a power-of-two subdivision of `[0, 1]`.
    pub fn is_uniform(&self) -> bool {
        self.0.coords.iter().all(|c| c.uniform_bits().is_some())
    }

    /// Lowest occupied coordinate on `axis`; `+∞` if empty.
    pub fn min(&self, axis: Axis) -> f64 {
        let first = self.0.grid.first_full(axis);
        if first >= self.0.grid.last_full(axis) {
            return f64::INFINITY;
        }
        self.0.coords[axis.index()].get(first as usize)
    }

    /// Highest occupied coordinate on `axis`; `-∞` if empty.
    pub fn max(&self, axis: Axis) -> f64 {
        let last = self.0.grid.last_full(axis);
        if self.0.grid.first_full(axis) >= last {
            return f64::NEG_INFINITY;
        }
        self.0.coords[axis.index()].get(last as usize)
    }

    /// Bounding box of the occupied cells.
    pub fn bounds(&self) -> Option<Aabb> {
        if self.is_empty() {
            return None;
        }
        Some(Aabb::new(
            self.min(Axis::X),
            self.min(Axis::Y),
            self.min(Axis::Z),
            self.max(Axis::X),
            self.max(Axis::Y),
            self.max(Axis::Z),
        ))
    }

    /// Index of the cell along `axis` containing `coord`, in `-1..=cells`.
    pub fn find_index(&self, axis: Axis, coord: f64) -> i32 {
        self.0.coords[axis.index()].find_index(coord)
    }

    /// The shape moved by `(dx, dy, dz)`.
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        if self.is_empty() {
            return algebra::empty();
        }
        let [x, y, z] = &self.0.coords;
        Self::with_coords(
            self.0.grid.clone(),
            [x.translated(dx), y.translated(dy), z.translated(dz)],
        )
    }

    /// Visit a set of coalesced boxes whose union is exactly this shape.
    pub fn for_all_boxes(&self, mut visit: impl FnMut(Aabb)) {
        let [cx, cy, cz] = &self.0.coords;
        blockshape_grid::for_all_boxes(&self.0.grid, true, |b| {
            visit(Aabb {
                min_x: cx.get(b.min_x as usize),
                min_y: cy.get(b.min_y as usize),
                min_z: cz.get(b.min_z as usize),
                max_x: cx.get(b.max_x as usize),
                max_y: cy.get(b.max_y as usize),
                max_z: cz.get(b.max_z as usize),
            });
        });
    }

    /// Coalesced boxes whose union is exactly this shape.
    pub fn to_aabbs(&self) -> Vec<Aabb> {
        let mut out = Vec::new();
        self.for_all_boxes(|b| out.push(b));
        out
    }

    /// Rebuild the shape as the union of its coalesced boxes.
    ///
    /// This drops boundaries that no longer separate differently filled cells, so later
    /// joins work on smaller grids.
    pub fn optimize(&self) -> Self {
        let mut result = algebra::empty();
        let mut boxes = 0_usize;
        self.for_all_boxes(|b| {
            boxes += 1;
            result = join_unoptimized(&result, &algebra::from_aabb(&b), BooleanOp::OR);
        });
        tracing::trace!(boxes, "optimized shape");
        result
    }

    /// The layer of cells touching the `direction` face, extruded over `[0, 1]` on that axis.
    ///
    /// Computed once per shape and direction.
    pub fn face_shape(&self, direction: Direction) -> Self {
        if self.is_empty() || self.is_block() {
            return self.clone();
        }
        let face = self.0.faces[direction.index()].get_or_init(|| self.compute_face(direction));
        face.clone().unwrap_or_else(|| self.clone())
    }

    fn compute_face(&self, direction: Direction) -> Option<Self> {
        let axis = direction.axis();
        let along = &self.0.coords[axis.index()];
        if along.cells() == 1 && approx_eq(along.first(), 0.0) && approx_eq(along.last(), 1.0) {
            return None;
        }
        let probe = match direction.axis_direction() {
            AxisDirection::Positive => 1.0 - EPSILON,
            AxisDirection::Negative => EPSILON,
        };
        let index = match u32::try_from(self.find_index(axis, probe)) {
            Ok(i) if i < self.0.grid.size(axis) => i,
            _ => return Some(algebra::empty()),
        };
        let grid = BitGrid::from_grid(&SubGrid::slice(&self.0.grid, axis, index));
        if grid.is_empty() {
            return Some(algebra::empty());
        }
        let mut coords = self.0.coords.clone();
        coords[axis.index()] = Coords::Uniform(0);
        let face = Self::with_coords(grid, coords);
        let cube_like = Axis::ALL.iter().all(|&a| {
            let c = face.coord_list(a);
            c.cells() == 1 && approx_eq(c.first(), 0.0) && approx_eq(c.last(), 1.0)
        });
        Some(if cube_like { algebra::block() } else { face })
    }

    /// Faces of the unit cube this shape covers completely.
    pub fn full_faces(&self) -> Faces {
        *self.0.full_faces.get_or_init(|| {
            let block = algebra::block();
            Direction::ALL
                .into_iter()
                .filter(|&d| !join_is_not_empty(&block, &self.face_shape(d), BooleanOp::ONLY_FIRST))
                .fold(Faces::empty(), |acc, d| acc | Faces::from(d))
        })
    }

    /// True if the `direction` face of the unit cube is fully covered.
    pub fn is_face_full(&self, direction: Direction) -> bool {
        self.full_faces().contains(Faces::from(direction))
    }

    /// True if the shape contains the whole unit cube.
    pub fn covers_block(&self) -> bool {
        *self.0.covers_block.get_or_init(|| {
            self.is_block() || !join_is_not_empty(&algebra::block(), self, BooleanOp::ONLY_FIRST)
        })
    }

    /// Coalesced boxes of the `direction` face, projected onto the face plane.
    ///
    /// Rect `x` runs along `axis.next()` and `y` along `axis.previous()`.
    pub fn face_footprint(&self, direction: Direction) -> Vec<Rect> {
        let axis = direction.axis();
        let (u, v) = (axis.next(), axis.previous());
        let mut out = Vec::new();
        self.face_shape(direction)
            .for_all_boxes(|b| out.push(Rect::new(b.min(u), b.min(v), b.max(u), b.max(v))));
        out
    }

    /// Clamp a movement of `aabb` by `distance` along `axis` so it stops at this shape.
    ///
    /// Faces up to [`EPSILON`] behind the moving box still block it.
    pub fn collide(&self, axis: Axis, aabb: &Aabb, distance: f64) -> f64 {
        if self.is_empty() {
            return distance;
        }
        if distance.abs() < EPSILON {
            return 0.0;
        }
        let grid = &self.0.grid;
        let (second, third) = (axis.next(), axis.previous());
        let box_min = aabb.min(axis);
        let box_max = aabb.max(axis);
        let lo = self.find_index(axis, box_min + EPSILON);
        let hi = self.find_index(axis, box_max - EPSILON);
        let footprint = |a: Axis| {
            let start = self.find_index(a, aabb.min(a) + EPSILON).max(0);
            let end = (self.find_index(a, aabb.max(a) - EPSILON) + 1).min(cells_along(grid, a));
            start..end
        };
        let (q_range, r_range) = (footprint(second), footprint(third));
        let hit = |p: i32| {
            q_range.clone().any(|q| {
                r_range.clone().any(|r| {
                    let (x, y, z) = unrotate(axis, p, q, r);
                    grid.is_full_wide(x, y, z)
                })
            })
        };
        let coords = &self.0.coords[axis.index()];
        let mut distance = distance;
        if distance > 0.0 {
            if let Some(p) = (hi + 1..cells_along(grid, axis)).find(|&p| hit(p)) {
                let gap = coords.get(p as usize) - box_max;
                if gap >= -EPSILON {
                    distance = distance.min(gap);
                }
            }
        } else if let Some(p) = (0..lo).rev().find(|&p| hit(p)) {
            let gap = coords.get(p as usize + 1) - box_min;
            if gap <= EPSILON {
                distance = distance.max(gap);
            }
        }
        distance
    }

    /// First point where the segment `from → to` enters this shape.
    ///
    /// A segment starting inside a full cell hits immediately, reported with `inside` set.
    pub fn clip(&self, from: [f64; 3], to: [f64; 3]) -> Option<RayHit> {
        if self.is_empty() {
            return None;
        }
        let delta = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];
        if delta.iter().map(|d| d * d).sum::<f64>() < EPSILON {
            return None;
        }
        let probe = [0, 1, 2].map(|i| from[i] + delta[i] * RAY_PROBE_FRACTION);
        let [x, y, z] = Axis::ALL.map(|a| self.find_index(a, probe[a.index()]));
        if self.0.grid.is_full_wide(x, y, z) {
            return Some(RayHit {
                point: probe,
                face: Direction::nearest(delta[0], delta[1], delta[2]).opposite(),
                inside: true,
            });
        }
        Aabb::clip_all(&self.to_aabbs(), from, to)
    }
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "Shape grids are far smaller than i32::MAX cells per axis."
)]
fn cells_along(grid: &BitGrid, axis: Axis) -> i32 {
    grid.size(axis) as i32
}

impl core::fmt::Debug for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shape")
            .field("grid", &self.0.grid)
            .field("coords", &self.0.coords)
            .finish_non_exhaustive()
    }
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blockshape Shape: axis-aligned solids for voxel worlds.
//!
//! A [`Shape`] is any union of axis-aligned boxes, stored as a
//! [`BitGrid`](blockshape_grid::BitGrid) of cells plus one strictly increasing boundary list per
//! axis. Shapes whose boundaries are power-of-two subdivisions of the unit cube share constant
//! tables and merge with integer arithmetic only.
//!
//! - Construction: [`empty`], [`block`], [`cuboid`] (validated), [`create`], [`from_aabb`].
//! - Boolean algebra over any bounded [`BooleanOp`]: [`join`], [`join_unoptimized`],
//!   the short-circuit [`join_is_not_empty`], [`or`], and the balanced [`or_all`].
//! - Face occlusion: [`Shape::face_shape`], [`block_occludes`], [`merged_face_occludes`],
//!   [`face_shape_occludes`].
//! - Movement: [`Shape::collide`] and [`collide`] clamp a box sweep; [`Shape::clip`] casts a ray.
//!
//! All operations are pure. Shapes are immutable, cheap to clone, and `Send + Sync`; derived
//! data such as face layers is computed lazily and cached on the shape.
//!
//! Coordinates closer than [`consts::EPSILON`] are treated as equal everywhere.
//!
//! # Example
//!
//! ```rust
//! use blockshape_shape::{Axis, Aabb, BooleanOp, Direction, block, create, join, or};
//!
//! // Two half blocks make a full one.
//! let west = create(0.0, 0.0, 0.0, 0.5, 1.0, 1.0);
//! let east = create(0.5, 0.0, 0.0, 1.0, 1.0, 1.0);
//! assert!(or(&west, &east).is_block());
//!
//! // Cutting a slab off the top of a block.
//! let slab = create(0.0, 0.5, 0.0, 1.0, 1.0, 1.0);
//! let rest = join(&block(), &slab, BooleanOp::ONLY_FIRST);
//! assert_eq!(rest.to_aabbs(), [Aabb::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0)]);
//! assert!(rest.is_face_full(Direction::Down));
//! assert!(!rest.is_face_full(Direction::Up));
//!
//! // A box falling onto it stops at the top face.
//! let falling = Aabb::new(0.25, 3.0, 0.25, 0.75, 4.0, 0.75);
//! assert_eq!(rest.collide(Axis::Y, &falling, -10.0), -2.5);
//! ```

mod algebra;
pub mod consts;
mod coords;
mod direction;
mod error;
mod merge;
mod occlusion;
mod op;
mod shape;
mod types;

pub use algebra::{
    block, collide, create, cuboid, empty, find_bits, from_aabb, join, join_is_not_empty,
    join_unoptimized, or, or_all,
};
pub use blockshape_grid::Axis;
pub use coords::Coords;
pub use direction::{AxisDirection, Direction, Faces};
pub use error::ShapeError;
pub use merge::{GridMerger, MergerKind};
pub use occlusion::{
    block_occludes, face_shape_occludes, merged_face_occludes, merged_may_occlude_block,
};
pub use op::BooleanOp;
pub use shape::Shape;
pub use types::{Aabb, RayHit};

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision sweep.
//!
//! Drop a box onto a small terrain of translated block shapes, then step it sideways into
//! a wall, resolving one axis at a time.
//!
//! Run:
//! - `cargo run -p blockshape_demos --example collision_sweep`

use blockshape_shape::{Aabb, Axis, Shape, block, collide, create};

fn main() {
    tracing_subscriber::fmt().init();

    // Floor: four full blocks at y = -1, a slab on top of one of them, and a wall.
    let mut terrain: Vec<Shape> = (0_u8..4)
        .map(|x| block().translated(f64::from(x), -1.0, 0.0))
        .collect();
    let slab = create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0).translated(2.0, 0.0, 0.0);
    terrain.push(slab.clone());
    terrain.push(block().translated(3.0, 0.0, 0.0));

    let mut mover = Aabb::new(0.2, 3.0, 0.2, 0.8, 4.8, 0.8);
    let velocity = [(Axis::Y, -10.0), (Axis::X, 4.0), (Axis::Y, -1.0)];
    for (axis, wanted) in velocity {
        let moved = collide(axis, &mover, &terrain, wanted);
        mover = match axis {
            Axis::X => mover.translated(moved, 0.0, 0.0),
            Axis::Y => mover.translated(0.0, moved, 0.0),
            Axis::Z => mover.translated(0.0, 0.0, moved),
        };
        println!("{axis:?}: moved {moved:.3} of {wanted}, now {mover:?}");
    }
    assert!(mover.min_y.abs() < 1e-9, "box rests on the floor");
    assert!((mover.max_x - 2.0).abs() < 1e-9, "box stops at the slab");

    // A ray fired down onto the slab.
    if let Some(hit) = slab.clip([2.5, 3.0, 0.5], [2.5, -3.0, 0.5]) {
        println!("ray hit {:?} at {:?}", hit.face, hit.point);
    }
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape basics.
//!
//! Build a stair shape from two boxes, inspect its boxes and faces, and test occlusion
//! against its neighbours.
//!
//! Run:
//! - `cargo run -p blockshape_demos --example shape_basics`

use blockshape_shape::{
    BooleanOp, Direction, block, block_occludes, create, empty, join, merged_face_occludes, or,
};
use kurbo::Rect;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .init();

    // Bottom slab plus the back half of the top layer.
    let slab = create(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
    let back = create(0.0, 0.5, 0.5, 1.0, 1.0, 1.0);
    let stairs = or(&slab, &back);
    for b in stairs.to_aabbs() {
        println!("box: {b:?}");
    }
    println!("full faces: {:?}", stairs.full_faces());

    // The top face is only half covered.
    let top: Vec<Rect> = stairs.face_footprint(Direction::Up);
    println!("top footprint: {top:?}");
    assert_eq!(top.len(), 1);

    // A full block below hides the stairs' bottom face.
    assert!(block_occludes(&stairs, &block(), Direction::Down));
    // A block resting on the stairs still shows part of its bottom face.
    assert!(!block_occludes(&block(), &stairs, Direction::Down));

    // The missing quarter is exactly the front half of the top layer.
    let missing = join(&block(), &stairs, BooleanOp::ONLY_FIRST);
    println!("missing: {:?}", missing.to_aabbs());

    // A front quarter above the stairs covers the other half of the shared face.
    let quarter = create(0.0, 0.0, 0.0, 1.0, 0.5, 0.5);
    assert!(merged_face_occludes(&stairs, &quarter, Direction::Up));
    assert!(!merged_face_occludes(&stairs, &empty(), Direction::Up));
    println!("stairs cover block: {}", stairs.covers_block());
}

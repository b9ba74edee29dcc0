// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous-space boxes and ray hits.

use blockshape_grid::Axis;

use crate::consts::EPSILON;
use crate::direction::{AxisDirection, Direction};

/// Axis-aligned box in 3D, in block-local units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum x (west)
    pub min_x: f64,
    /// Minimum y (bottom)
    pub min_y: f64,
    /// Minimum z (north)
    pub min_z: f64,
    /// Maximum x (east)
    pub max_x: f64,
    /// Maximum y (top)
    pub max_y: f64,
    /// Maximum z (south)
    pub max_z: f64,
}

impl Aabb {
    /// Create a box from min/max corners.
    ///
    /// # Panics
    ///
    /// Panics if a minimum exceeds its maximum.
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        assert!(
            min_x <= max_x && min_y <= max_y && min_z <= max_z,
            "invalid Aabb: min > max"
        );
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Lower corner on `axis`.
    #[inline]
    pub fn min(&self, axis: Axis) -> f64 {
        axis.choose(self.min_x, self.min_y, self.min_z)
    }

    /// Upper corner on `axis`.
    #[inline]
    pub fn max(&self, axis: Axis) -> f64 {
        axis.choose(self.max_x, self.max_y, self.max_z)
    }

    /// The box moved by `(dx, dy, dz)`.
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            min_z: self.min_z + dz,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
            max_z: self.max_z + dz,
        }
    }

    /// True if the interiors overlap. Touching faces do not count.
    pub fn intersects(&self, other: &Self) -> bool {
        Axis::ALL
            .iter()
            .all(|&a| self.min(a) < other.max(a) && other.min(a) < self.max(a))
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            min_z: self.min_z.min(other.min_z),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
            max_z: self.max_z.max(other.max_z),
        }
    }

    /// Volume of the box.
    pub fn volume(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y) * (self.max_z - self.min_z)
    }

    /// Nearest entry of the segment `from → to` into any of `boxes`.
    ///
    /// Only faces the segment enters from outside are considered.
    pub fn clip_all<'a>(
        boxes: impl IntoIterator<Item = &'a Self>,
        from: [f64; 3],
        to: [f64; 3],
    ) -> Option<RayHit> {
        let delta = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];
        let mut best_t = 1.0;
        let mut best_face = None;
        for b in boxes {
            for axis in Axis::ALL {
                let d = delta[axis.index()];
                let (plane, sign) = if d > EPSILON {
                    (b.min(axis), AxisDirection::Negative)
                } else if d < -EPSILON {
                    (b.max(axis), AxisDirection::Positive)
                } else {
                    continue;
                };
                let t = (plane - from[axis.index()]) / d;
                if !(0.0 < t && t < best_t) {
                    continue;
                }
                let inside = [axis.next(), axis.previous()].iter().all(|&other| {
                    let p = from[other.index()] + t * delta[other.index()];
                    b.min(other) - EPSILON < p && p < b.max(other) + EPSILON
                });
                if inside {
                    best_t = t;
                    best_face = Some(Direction::from_axis(axis, sign));
                }
            }
        }
        best_face.map(|face| RayHit {
            point: [
                from[0] + best_t * delta[0],
                from[1] + best_t * delta[1],
                from[2] + best_t * delta[2],
            ],
            face,
            inside: false,
        })
    }
}

/// Where a ray first meets a shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Hit location.
    pub point: [f64; 3],
    /// Face of the shape that was hit.
    pub face: Direction,
    /// True if the ray started inside the shape.
    pub inside: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_excludes_touching() {
        let a = Aabb::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let b = a.translated(1.0, 0.0, 0.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&a.translated(0.5, 0.5, 0.5)));
        assert_eq!(a.union(&b).max_x, 2.0);
    }

    #[test]
    fn clip_reports_entry_face() {
        let boxes = [
            Aabb::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0),
            Aabb::new(0.0, 0.5, 0.5, 1.0, 1.0, 1.0),
        ];
        let hit = Aabb::clip_all(&boxes, [0.5, 2.0, 0.25], [0.5, -1.0, 0.25]).unwrap();
        assert_eq!(hit.face, Direction::Up);
        assert!((hit.point[1] - 0.5).abs() < 1e-12);

        let hit = Aabb::clip_all(&boxes, [-1.0, 0.75, 0.75], [2.0, 0.75, 0.75]).unwrap();
        assert_eq!(hit.face, Direction::West);
        assert!(hit.point[0].abs() < 1e-12);
    }

    #[test]
    fn clip_misses_when_segment_is_short() {
        let boxes = [Aabb::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)];
        assert!(Aabb::clip_all(&boxes, [-2.0, 0.5, 0.5], [-1.0, 0.5, 0.5]).is_none());
    }
}

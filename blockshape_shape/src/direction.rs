// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Face directions of the unit cube.

use bitflags::bitflags;
use blockshape_grid::Axis;

/// Sign of a direction along its axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    /// Towards `+∞`.
    Positive,
    /// Towards `-∞`.
    Negative,
}

impl AxisDirection {
    /// `1.0` or `-1.0`.
    pub const fn step(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// The other sign.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// One of the six faces of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `-y`
    Down,
    /// `+y`
    Up,
    /// `-z`
    North,
    /// `+z`
    South,
    /// `-x`
    West,
    /// `+x`
    East,
}

impl Direction {
    /// All six directions.
    pub const ALL: [Self; 6] = [
        Self::Down,
        Self::Up,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    /// Position of this direction in [`Direction::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Down => 0,
            Self::Up => 1,
            Self::North => 2,
            Self::South => 3,
            Self::West => 4,
            Self::East => 5,
        }
    }

    /// The axis this direction points along.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Down | Self::Up => Axis::Y,
            Self::North | Self::South => Axis::Z,
            Self::West | Self::East => Axis::X,
        }
    }

    /// The sign of this direction along its axis.
    pub const fn axis_direction(self) -> AxisDirection {
        match self {
            Self::Up | Self::South | Self::East => AxisDirection::Positive,
            Self::Down | Self::North | Self::West => AxisDirection::Negative,
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Direction along `axis` with the given sign.
    pub const fn from_axis(axis: Axis, sign: AxisDirection) -> Self {
        match (axis, sign) {
            (Axis::X, AxisDirection::Positive) => Self::East,
            (Axis::X, AxisDirection::Negative) => Self::West,
            (Axis::Y, AxisDirection::Positive) => Self::Up,
            (Axis::Y, AxisDirection::Negative) => Self::Down,
            (Axis::Z, AxisDirection::Positive) => Self::South,
            (Axis::Z, AxisDirection::Negative) => Self::North,
        }
    }

    /// Unit normal as `[x, y, z]`.
    pub fn normal(self) -> [f64; 3] {
        let mut n = [0.0; 3];
        n[self.axis().index()] = self.axis_direction().step();
        n
    }

    /// The direction whose normal best matches `(dx, dy, dz)`.
    ///
    /// Ties resolve to the earlier entry of [`Direction::ALL`].
    pub fn nearest(dx: f64, dy: f64, dz: f64) -> Self {
        let mut best = Self::North;
        let mut best_dot = f64::MIN;
        for dir in Self::ALL {
            let [nx, ny, nz] = dir.normal();
            let dot = nx * dx + ny * dy + nz * dz;
            if dot > best_dot {
                best_dot = dot;
                best = dir;
            }
        }
        best
    }
}

bitflags! {
    /// A set of block faces.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Faces: u8 {
        /// [`Direction::Down`]
        const DOWN  = 0b0000_0001;
        /// [`Direction::Up`]
        const UP    = 0b0000_0010;
        /// [`Direction::North`]
        const NORTH = 0b0000_0100;
        /// [`Direction::South`]
        const SOUTH = 0b0000_1000;
        /// [`Direction::West`]
        const WEST  = 0b0001_0000;
        /// [`Direction::East`]
        const EAST  = 0b0010_0000;
    }
}

impl From<Direction> for Faces {
    fn from(dir: Direction) -> Self {
        Self::from_bits_truncate(1_u8 << dir.index())
    }
}

// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartesian axes.

/// One of the three cartesian axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The x axis (west/east).
    X,
    /// The y axis (down/up).
    Y,
    /// The z axis (north/south).
    Z,
}

impl Axis {
    /// All axes in `X, Y, Z` order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Position of this axis in `X, Y, Z` order.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Pick the component belonging to this axis.
    #[inline]
    pub fn choose<T>(self, x: T, y: T, z: T) -> T {
        match self {
            Self::X => x,
            Self::Y => y,
            Self::Z => z,
        }
    }

    /// The following axis in cyclic order (`X → Y → Z → X`).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }

    /// The preceding axis in cyclic order (`X → Z → Y → X`).
    #[inline]
    pub const fn previous(self) -> Self {
        match self {
            Self::X => Self::Z,
            Self::Y => Self::X,
            Self::Z => Self::Y,
        }
    }
}

/// Reassemble `(x, y, z)` from components expressed along `(axis, axis.next(), axis.previous())`.
#[inline]
pub fn unrotate<T: Copy>(axis: Axis, primary: T, secondary: T, tertiary: T) -> (T, T, T) {
    match axis {
        Axis::X => (primary, secondary, tertiary),
        Axis::Y => (tertiary, primary, secondary),
        Axis::Z => (secondary, tertiary, primary),
    }
}

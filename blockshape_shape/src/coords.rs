// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis boundary lists mapping grid indices to real coordinates.

use std::sync::Arc;

use crate::consts::{MAX_RESOLUTION_BITS, UNIFORM_COORDS};

/// Strictly increasing cell boundaries along one axis; `cells + 1` entries.
#[derive(Clone, Debug, PartialEq)]
pub enum Coords {
    /// `2^bits` equal cells over `[0, 1]`, backed by a shared constant table.
    Uniform(u8),
    /// Arbitrary boundaries.
    Explicit(Arc<[f64]>),
}

impl Coords {
    /// Uniform subdivision with `2^bits` cells.
    ///
    /// # Panics
    ///
    /// Panics if `bits` exceeds [`MAX_RESOLUTION_BITS`].
    pub fn uniform(bits: u8) -> Self {
        assert!(
            bits <= MAX_RESOLUTION_BITS,
            "uniform resolution 2^{bits} is finer than supported"
        );
        Self::Uniform(bits)
    }

    /// Explicit boundaries.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty, not finite, or not strictly increasing.
    pub fn explicit(values: impl Into<Arc<[f64]>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "coordinate list must not be empty");
        assert!(
            values.iter().all(|v| v.is_finite()),
            "coordinate list must be finite"
        );
        assert!(
            values.windows(2).all(|w| w[0] < w[1]),
            "coordinate list must be strictly increasing"
        );
        Self::Explicit(values)
    }

    /// The boundaries as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Uniform(bits) => UNIFORM_COORDS[usize::from(*bits)],
            Self::Explicit(values) => &values[..],
        }
    }

    /// Number of cells (one less than the number of boundaries).
    #[inline]
    pub fn cells(&self) -> u32 {
        match self {
            Self::Uniform(bits) => 1 << *bits,
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Shape grids are far smaller than u32::MAX cells per axis."
            )]
            Self::Explicit(values) => (values.len() - 1) as u32,
        }
    }

    /// Boundary `index`.
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.as_slice()[index]
    }

    /// First boundary.
    pub fn first(&self) -> f64 {
        self.get(0)
    }

    /// Last boundary.
    pub fn last(&self) -> f64 {
        self.get(self.cells() as usize)
    }

    /// Bit depth if this is a uniform subdivision.
    pub fn uniform_bits(&self) -> Option<u8> {
        match self {
            Self::Uniform(bits) => Some(*bits),
            Self::Explicit(_) => None,
        }
    }

    /// Index of the cell containing `coord`.
    ///
    /// Returns `-1` below the first boundary and `cells()` at or above the last one.
    pub fn find_index(&self, coord: f64) -> i32 {
        match self {
            Self::Uniform(bits) => {
                let cells = f64::from(1_u32 << *bits);
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Value is clamped into [-1, cells] before the cast."
                )]
                let index = (coord * cells).floor().clamp(-1.0, cells) as i32;
                index
            }
            Self::Explicit(values) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_possible_wrap,
                    reason = "Shape grids are far smaller than i32::MAX cells per axis."
                )]
                let above = values.partition_point(|&v| v <= coord) as i32;
                above - 1
            }
        }
    }

    /// The same boundaries shifted by `offset`.
    pub fn translated(&self, offset: f64) -> Self {
        Self::Explicit(self.as_slice().iter().map(|v| v + offset).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_and_explicit_agree_on_lookup() {
        let u = Coords::uniform(2);
        let e = Coords::explicit(vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(u.as_slice(), e.as_slice());
        for c in [-0.5, 0.0, 0.1, 0.25, 0.6, 0.99, 1.0, 3.0] {
            assert_eq!(u.find_index(c), e.find_index(c), "coord {c}");
        }
        assert_eq!(u.find_index(-0.1), -1);
        assert_eq!(u.find_index(1.0), 4);
        assert_eq!(u.cells(), 4);
    }

    #[test]
    fn translation_makes_explicit() {
        let t = Coords::uniform(1).translated(2.0);
        assert_eq!(t.as_slice(), &[2.0, 2.5, 3.0]);
        assert_eq!(t.uniform_bits(), None);
        assert_eq!(t.find_index(2.6), 1);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn rejects_unsorted_lists() {
        let _ = Coords::explicit(vec![0.0, 0.5, 0.5]);
    }
}

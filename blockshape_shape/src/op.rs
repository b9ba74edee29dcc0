// Copyright 2025 the Blockshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-input boolean predicates used to combine shapes cell by cell.

use core::fmt::Debug;

/// A boolean function of `(in_first, in_second)`, stored as a 4-entry truth table.
///
/// Bit `2 * a + b` holds the result for inputs `(a, b)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct BooleanOp(u8);

impl BooleanOp {
    /// Always false.
    pub const FALSE: Self = Self(0b0000);
    /// In neither shape. Unbounded.
    pub const NOT_OR: Self = Self(0b0001);
    /// In the second shape only.
    pub const ONLY_SECOND: Self = Self(0b0010);
    /// Not in the first shape. Unbounded.
    pub const NOT_FIRST: Self = Self(0b0011);
    /// In the first shape only (difference `first - second`).
    pub const ONLY_FIRST: Self = Self(0b0100);
    /// Not in the second shape. Unbounded.
    pub const NOT_SECOND: Self = Self(0b0101);
    /// In exactly one shape (symmetric difference).
    pub const NOT_SAME: Self = Self(0b0110);
    /// Not in both shapes. Unbounded.
    pub const NOT_AND: Self = Self(0b0111);
    /// In both shapes (intersection).
    pub const AND: Self = Self(0b1000);
    /// In both or neither. Unbounded.
    pub const SAME: Self = Self(0b1001);
    /// In the second shape.
    pub const SECOND: Self = Self(0b1010);
    /// First implies second. Unbounded.
    pub const CAUSES: Self = Self(0b1011);
    /// In the first shape.
    pub const FIRST: Self = Self(0b1100);
    /// Second implies first. Unbounded.
    pub const CAUSED_BY: Self = Self(0b1101);
    /// In either shape (union).
    pub const OR: Self = Self(0b1110);
    /// Always true. Unbounded.
    pub const TRUE: Self = Self(0b1111);

    /// Build an operation from an arbitrary predicate.
    pub fn from_fn(f: impl Fn(bool, bool) -> bool) -> Self {
        let mut table = 0;
        for (bit, (a, b)) in [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .enumerate()
        {
            if f(a, b) {
                table |= 1 << bit;
            }
        }
        Self(table)
    }

    /// Evaluate the predicate.
    #[inline]
    pub const fn apply(self, first: bool, second: bool) -> bool {
        let bit = ((first as u8) << 1) | second as u8;
        (self.0 >> bit) & 1 != 0
    }

    /// False when both inputs are false, so the result stays inside the operands' extent.
    #[inline]
    pub const fn is_bounded(self) -> bool {
        !self.apply(false, false)
    }

    fn name(self) -> &'static str {
        const NAMES: [&str; 16] = [
            "FALSE",
            "NOT_OR",
            "ONLY_SECOND",
            "NOT_FIRST",
            "ONLY_FIRST",
            "NOT_SECOND",
            "NOT_SAME",
            "NOT_AND",
            "AND",
            "SAME",
            "SECOND",
            "CAUSES",
            "FIRST",
            "CAUSED_BY",
            "OR",
            "TRUE",
        ];
        NAMES[usize::from(self.0 & 0b1111)]
    }
}

impl Debug for BooleanOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_ops_match_their_predicates() {
        let cases: [(BooleanOp, fn(bool, bool) -> bool); 6] = [
            (BooleanOp::OR, |a, b| a || b),
            (BooleanOp::AND, |a, b| a && b),
            (BooleanOp::ONLY_FIRST, |a, b| a && !b),
            (BooleanOp::ONLY_SECOND, |a, b| !a && b),
            (BooleanOp::NOT_SAME, |a, b| a != b),
            (BooleanOp::CAUSES, |a, b| !a || b),
        ];
        for (op, f) in cases {
            assert_eq!(BooleanOp::from_fn(f), op, "{op:?}");
            for a in [false, true] {
                for b in [false, true] {
                    assert_eq!(op.apply(a, b), f(a, b), "{op:?}({a}, {b})");
                }
            }
        }
    }

    #[test]
    fn boundedness() {
        assert!(BooleanOp::OR.is_bounded());
        assert!(BooleanOp::ONLY_FIRST.is_bounded());
        assert!(!BooleanOp::NOT_OR.is_bounded());
        assert!(!BooleanOp::TRUE.is_bounded());
        assert_eq!(format!("{:?}", BooleanOp::CAUSED_BY), "CAUSED_BY");
    }
}

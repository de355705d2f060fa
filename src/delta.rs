// This file is part of the delta-movements generator.
// Copyright (C) 2026 The delta-movements developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{fmt, ops::Neg};

use crate::square::Square;

/// Signed difference between two 0x88 addresses.
///
/// Always within `-0x77..=0x77`, the distance between opposite corners of
/// the board.
///
/// # Examples
///
/// ```
/// use delta_movements::{Delta, Square};
///
/// let delta = Delta::between(Square::H8, Square::A1);
/// assert_eq!(delta.to_i8(), 0x77);
/// assert_eq!(delta.table_index(), 0xee);
/// assert_eq!((-delta).table_index(), 0);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Delta(i8);

impl Delta {
    /// Largest magnitude of a delta between two on-board squares.
    pub const MAX: u8 = 0x77;

    pub const ZERO: Delta = Delta(0);

    /// Gets the delta with the given value, or `None` if no two on-board
    /// squares are that far apart.
    pub const fn new(value: i32) -> Option<Delta> {
        if -(Delta::MAX as i32) <= value && value <= Delta::MAX as i32 {
            Some(Delta(value as i8))
        } else {
            None
        }
    }

    /// Difference `to - from`.
    #[inline]
    pub const fn between(to: Square, from: Square) -> Delta {
        // Both addresses are at most 0x77, so the difference fits.
        Delta(to.to_u8() as i8 - from.to_u8() as i8)
    }

    #[inline]
    pub const fn to_i8(self) -> i8 {
        self.0
    }

    #[inline]
    pub const fn magnitude(self) -> u8 {
        self.0.unsigned_abs()
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Gets the delta with the given magnitude and the sign of `self`.
    pub const fn with_magnitude(self, magnitude: u8) -> Option<Delta> {
        let value = magnitude as i32;
        Delta::new(if self.is_negative() { -value } else { value })
    }

    /// Index into a table covering every delta, biased by [`Delta::MAX`]
    /// so that `-0x77` maps to 0.
    #[inline]
    pub const fn table_index(self) -> usize {
        (self.0 as i16 + Delta::MAX as i16) as usize
    }
}

impl Neg for Delta {
    type Output = Delta;

    #[inline]
    fn neg(self) -> Delta {
        Delta(-self.0)
    }
}

impl From<Delta> for i8 {
    #[inline]
    fn from(delta: Delta) -> i8 {
        delta.0
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-0x{:02X}", self.magnitude())
        } else {
            write!(f, "0x{:02X}", self.magnitude())
        }
    }
}
